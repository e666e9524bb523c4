//! Resolution contexts: where variables and record fields come from.

use crate::value::{Object, Value};
use std::collections::HashMap;

/// Source of names an expression can refer to
pub trait Context {
    /// Value bound to `name`, or `Value::Void` when nothing is bound
    fn resolve(&self, name: &str) -> Value;

    /// The record being evaluated, if any
    fn current_record(&self) -> Option<&Object>;
}

/// Variable bindings for a query, without a current record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    vars: HashMap<String, Value>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a variable, returning the previous binding
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.vars.insert(name.into(), value.into())
    }

    /// Builder-style binding
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl Context for Params {
    fn resolve(&self, name: &str) -> Value {
        self.vars.get(name).cloned().unwrap_or(Value::Void)
    }

    fn current_record(&self) -> Option<&Object> {
        None
    }
}

/// Variable bindings plus the record a predicate is being tested against
#[derive(Debug, Clone, Copy)]
pub struct RecordContext<'a> {
    params: &'a Params,
    record: &'a Object,
}

impl<'a> RecordContext<'a> {
    pub fn new(params: &'a Params, record: &'a Object) -> Self {
        Self { params, record }
    }
}

impl Context for RecordContext<'_> {
    fn resolve(&self, name: &str) -> Value {
        self.params.resolve(name)
    }

    fn current_record(&self) -> Option<&Object> {
        Some(self.record)
    }
}
