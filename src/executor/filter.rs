//! Filter executor implementation.
//!
//! This executor filters records from a child executor based on a `WHERE`
//! expression. A record passes when the expression evaluates to a truthy
//! value; an evaluation error makes the record non-matching rather than
//! aborting the scan.

use crate::config::EvalConfig;
use crate::executor::Executor;
use crate::expression::{truthy, Expression, ExpressionEvaluator, Params, RecordContext};
use crate::value::Object;
use anyhow::{bail, Result};

/// Executor that filters records based on an expression
pub struct FilterExecutor {
    /// Child executor that produces records
    child: Box<dyn Executor>,
    /// Filter expression, judged by truthiness
    filter_expr: Expression,
    /// Variable bindings visible to the expression
    params: Params,
    /// Evaluator limits
    config: EvalConfig,
    /// Whether the executor has been initialized
    initialized: bool,
}

impl FilterExecutor {
    /// Create a new filter executor
    ///
    /// # Arguments
    /// * `child` - The child executor that produces records
    /// * `filter_expr` - The `WHERE` expression
    /// * `params` - Variable bindings for `$name` references
    pub fn new(child: Box<dyn Executor>, filter_expr: Expression, params: Params) -> Self {
        Self::with_config(child, filter_expr, params, EvalConfig::default())
    }

    /// Create a new filter executor with explicit evaluator limits.
    ///
    /// Only `max_depth` applies per executor; call [`EvalConfig::install`]
    /// to resize the shared pattern cache.
    pub fn with_config(
        child: Box<dyn Executor>,
        filter_expr: Expression,
        params: Params,
        config: EvalConfig,
    ) -> Self {
        Self {
            child,
            filter_expr,
            params,
            config,
            initialized: false,
        }
    }

    fn matches(&self, record: &Object) -> bool {
        let ctx = RecordContext::new(&self.params, record);
        match ExpressionEvaluator::with_config(&ctx, &self.config).evaluate(&self.filter_expr) {
            Ok(value) => truthy(&value),
            Err(err) => {
                log::debug!("Filter treated record as non-matching: {}", err);
                false
            }
        }
    }
}

impl Executor for FilterExecutor {
    fn init(&mut self) -> Result<()> {
        if self.initialized {
            return Ok(());
        }

        // Initialize child executor
        self.child.init()?;

        self.initialized = true;
        Ok(())
    }

    fn next(&mut self) -> Result<Option<Object>> {
        if !self.initialized {
            bail!("Executor not initialized. Call init() first.");
        }

        // Keep pulling records from child until one matches
        while let Some(record) = self.child.next()? {
            if self.matches(&record) {
                return Ok(Some(record));
            }
        }
        Ok(None)
    }
}
