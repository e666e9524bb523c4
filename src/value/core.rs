use super::{Number, Regex, Thing};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// String-keyed mapping used for objects and records
pub type Object = BTreeMap<String, Value>;

/// Kinds of values the evaluator distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    Void,
    Null,
    Empty,
    Bool,
    Number,
    String,
    Datetime,
    Regex,
    Thing,
    Array,
    Object,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Void => "void",
            Kind::Null => "null",
            Kind::Empty => "empty",
            Kind::Bool => "bool",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Datetime => "datetime",
            Kind::Regex => "regex",
            Kind::Thing => "thing",
            Kind::Array => "array",
            Kind::Object => "object",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime value produced by evaluating an expression
#[derive(Debug, Clone)]
pub enum Value {
    /// Nothing resolved: unbound variable, missing field
    Void,
    /// Explicit NULL literal
    Null,
    /// The EMPTY keyword, only ever a query literal
    Empty,
    Bool(bool),
    Number(Number),
    String(String),
    Datetime(DateTime<Utc>),
    Regex(Regex),
    Thing(Thing),
    Array(Vec<Value>),
    Object(Object),
}

impl Value {
    /// Get the kind of this value
    pub fn kind(&self) -> Kind {
        match self {
            Value::Void => Kind::Void,
            Value::Null => Kind::Null,
            Value::Empty => Kind::Empty,
            Value::Bool(_) => Kind::Bool,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Datetime(_) => Kind::Datetime,
            Value::Regex(_) => Kind::Regex,
            Value::Thing(_) => Kind::Thing,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Value::Void)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// True only for the EMPTY literal, not for empty containers
    pub fn is_empty_literal(&self) -> bool {
        matches!(self, Value::Empty)
    }

    /// One of the three absence sentinels: VOID, NULL, EMPTY
    pub fn is_sentinel(&self) -> bool {
        matches!(self, Value::Void | Value::Null | Value::Empty)
    }

    /// Array or object with no entries
    pub fn is_empty_container(&self) -> bool {
        match self {
            Value::Array(items) => items.is_empty(),
            Value::Object(map) => map.is_empty(),
            _ => false,
        }
    }

    /// Textual form of a scalar, as seen by pattern matching.
    ///
    /// Containers, patterns and sentinels have no such form.
    pub fn as_raw_string(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            Value::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
            Value::Thing(t) => Some(Cow::Owned(t.to_string())),
            Value::Datetime(dt) => Some(Cow::Owned(render_datetime(dt))),
            Value::Void
            | Value::Null
            | Value::Empty
            | Value::Regex(_)
            | Value::Array(_)
            | Value::Object(_) => None,
        }
    }

    /// Deep structural equality without coercion.
    ///
    /// Nested arrays and objects are walked with an explicit work stack so
    /// arbitrarily deep values cannot exhaust the call stack.
    pub fn structural_eq(&self, other: &Value) -> bool {
        let mut pending: Vec<(&Value, &Value)> = vec![(self, other)];

        while let Some((left, right)) = pending.pop() {
            match (left, right) {
                (Value::Array(a), Value::Array(b)) => {
                    if a.len() != b.len() {
                        return false;
                    }
                    pending.extend(a.iter().zip(b.iter()));
                }
                (Value::Object(a), Value::Object(b)) => {
                    if a.len() != b.len() {
                        return false;
                    }
                    for (key, value) in a {
                        match b.get(key) {
                            Some(other) => pending.push((value, other)),
                            None => return false,
                        }
                    }
                }
                _ => {
                    if !scalar_eq(left, right) {
                        return false;
                    }
                }
            }
        }

        true
    }

    /// Partial order within compatible kinds.
    ///
    /// Numbers, strings, datetimes and things order among themselves, and
    /// a thing orders against a string by its `table:id` rendering.
    /// Everything else is incomparable and yields `None`.
    pub fn compare_order(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            (Value::Datetime(a), Value::Datetime(b)) => Some(a.cmp(b)),
            (Value::Thing(a), Value::Thing(b)) => {
                Some(a.to_string().cmp(&b.to_string()).then_with(|| a.cmp(b)))
            }
            (Value::Thing(t), Value::String(s)) => Some(t.to_string().as_str().cmp(s.as_str())),
            (Value::String(s), Value::Thing(t)) => Some(s.as_str().cmp(t.to_string().as_str())),
            _ => None,
        }
    }
}

fn scalar_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Void, Value::Void) | (Value::Null, Value::Null) | (Value::Empty, Value::Empty) => {
            true
        }
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Datetime(a), Value::Datetime(b)) => a == b,
        (Value::Regex(a), Value::Regex(b)) => a == b,
        (Value::Thing(a), Value::Thing(b)) => a == b,
        _ => false,
    }
}

/// Canonical text of a datetime: RFC 3339, UTC, shortest exact fraction
pub fn render_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.structural_eq(other)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Void => f.write_str("VOID"),
            Value::Null => f.write_str("NULL"),
            Value::Empty => f.write_str("EMPTY"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Datetime(dt) => write!(f, "{:?}", render_datetime(dt)),
            Value::Regex(re) => write!(f, "{}", re),
            Value::Thing(t) => write!(f, "{}", t),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Object(map) => {
                if map.is_empty() {
                    return f.write_str("{}");
                }
                f.write_str("{ ")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                f.write_str(" }")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Number(Number::Int(v))
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Number(Number::Int(v as i64))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(Number::Float(v))
    }
}

impl From<Number> for Value {
    fn from(v: Number) -> Self {
        Value::Number(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Datetime(v)
    }
}

impl From<Regex> for Value {
    fn from(v: Regex) -> Self {
        Value::Regex(v)
    }
}

impl From<Thing> for Value {
    fn from(v: Thing) -> Self {
        Value::Thing(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Array(v)
    }
}

impl From<Object> for Value {
    fn from(v: Object) -> Self {
        Value::Object(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Number(Number::Int(i)),
                None => Value::Number(Number::Float(n.as_f64().unwrap_or(f64::NAN))),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn nested_array(depth: usize) -> Value {
        let mut value = Value::from(1);
        for _ in 0..depth {
            value = Value::Array(vec![value]);
        }
        value
    }

    #[test]
    fn test_kind() {
        assert_eq!(Value::Void.kind(), Kind::Void);
        assert_eq!(Value::Null.kind(), Kind::Null);
        assert_eq!(Value::Empty.kind(), Kind::Empty);
        assert_eq!(Value::from(1).kind(), Kind::Number);
        assert_eq!(Value::from("a").kind(), Kind::String);
        assert_eq!(Value::from(Thing::new("a", "b")).kind(), Kind::Thing);
        assert_eq!(Value::Array(vec![]).kind(), Kind::Array);
        assert_eq!(Value::Object(Object::new()).kind(), Kind::Object);
        assert_eq!(Kind::Datetime.to_string(), "datetime");
    }

    #[test]
    fn test_sentinels() {
        assert!(Value::Void.is_sentinel());
        assert!(Value::Null.is_sentinel());
        assert!(Value::Empty.is_sentinel());
        assert!(!Value::from("").is_sentinel());
        assert!(Value::Array(vec![]).is_empty_container());
        assert!(!Value::from("").is_empty_container());
    }

    #[test]
    fn test_structural_array_equality() {
        let a = Value::from(vec![Value::from(1), Value::from(2), Value::from(3)]);
        let b = Value::from(vec![Value::from(1), Value::from(2), Value::from(3)]);
        let c = Value::from(vec![Value::from(3), Value::from(2), Value::from(1)]);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, Value::Array(vec![Value::from(1)]));
    }

    #[test]
    fn test_structural_object_equality_ignores_insertion_order() {
        let a = Value::from(json!({"a": 1, "b": {"c": [true]}}));
        let b = Value::from(json!({"b": {"c": [true]}, "a": 1}));
        let c = Value::from(json!({"a": 1, "b": {"c": [false]}}));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, Value::from(json!({"a": 1})));
    }

    #[test]
    fn test_structural_equality_has_no_coercion() {
        assert!(!Value::from(1).structural_eq(&Value::from("1")));
        assert!(!Value::Null.structural_eq(&Value::Empty));
        assert!(Value::from(1).structural_eq(&Value::from(1.0)));
    }

    #[test]
    fn test_deeply_nested_equality() {
        let a = nested_array(1_000);
        let b = nested_array(1_000);
        assert!(a.structural_eq(&b));
        assert!(!a.structural_eq(&nested_array(999)));
    }

    #[test]
    fn test_compare_order() {
        assert_eq!(
            Value::from(1).compare_order(&Value::from(2)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Value::from("def").compare_order(&Value::from("abc")),
            Some(Ordering::Greater)
        );
        assert_eq!(
            Value::from(Thing::new("a", "1")).compare_order(&Value::from(Thing::new("a", "2"))),
            Some(Ordering::Less)
        );
        assert_eq!(
            Value::from(Thing::new("person", "test")).compare_order(&Value::from("user")),
            Some(Ordering::Less)
        );
        assert_eq!(
            Value::from("person:test").compare_order(&Value::from(Thing::new("person", "test"))),
            Some(Ordering::Equal)
        );
        assert_eq!(Value::from(1).compare_order(&Value::from("1")), None);
        assert_eq!(
            Value::Object(Object::new()).compare_order(&Value::Object(Object::new())),
            None
        );
    }

    #[test]
    fn test_raw_string() {
        assert_eq!(Value::from(1).as_raw_string().as_deref(), Some("1"));
        assert_eq!(Value::from(true).as_raw_string().as_deref(), Some("true"));
        assert_eq!(
            Value::from(Thing::new("person", "test"))
                .as_raw_string()
                .as_deref(),
            Some("person:test")
        );
        assert!(Value::Null.as_raw_string().is_none());
        assert!(Value::Array(vec![]).as_raw_string().is_none());
    }

    #[test]
    fn test_datetime_render() {
        let dt = DateTime::parse_from_rfc3339("1987-06-22T08:30:30.511Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(render_datetime(&dt), "1987-06-22T08:30:30.511Z");
    }

    #[test]
    fn test_from_json() {
        let value = Value::from(json!({"n": 1, "f": 1.5, "s": "x", "z": null, "a": [1]}));
        match value {
            Value::Object(map) => {
                assert!(matches!(map["n"], Value::Number(Number::Int(1))));
                assert!(matches!(map["f"], Value::Number(Number::Float(f)) if f == 1.5));
                assert_eq!(map["s"], Value::from("x"));
                assert!(map["z"].is_null());
                assert_eq!(map["a"], Value::Array(vec![Value::from(1)]));
            }
            other => panic!("expected object, got {}", other),
        }
    }

    #[test]
    fn test_display() {
        let value = Value::from(json!({"a": [1, "x"], "b": null}));
        assert_eq!(value.to_string(), r#"{ a: [1, "x"], b: NULL }"#);
        assert_eq!(Value::Void.to_string(), "VOID");
        assert_eq!(Value::Object(Object::new()).to_string(), "{}");
    }
}
