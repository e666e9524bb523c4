//! Evaluator configuration.
//!
//! Specifies limits only; enforcement happens in the evaluator and the
//! pattern cache. `max_depth` is read by every evaluator built from the
//! configuration. `regex_cache_capacity` governs the process-wide cache and
//! takes effect only through [`EvalConfig::install`].

use crate::value::{RegexCache, DEFAULT_REGEX_CACHE_CAPACITY};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Evaluator limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    /// Maximum expression nesting the evaluator will descend
    pub max_depth: usize,

    /// Number of compiled patterns the shared cache keeps.
    /// Ignored until [`EvalConfig::install`] is called.
    pub regex_cache_capacity: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            max_depth: 256,
            regex_cache_capacity: DEFAULT_REGEX_CACHE_CAPACITY,
        }
    }
}

impl EvalConfig {
    /// Create a new configuration with default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Failed to parse evaluator configuration")
    }

    /// Apply the process-wide parts of this configuration.
    ///
    /// Evaluators never call this themselves; the shared pattern cache is
    /// resized only here.
    pub fn install(&self) {
        RegexCache::global().set_capacity(self.regex_cache_capacity);
        log::debug!(
            "Evaluator configured: max_depth={}, regex_cache_capacity={}",
            self.max_depth,
            self.regex_cache_capacity
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::{Expression, ExpressionEvaluator, Params};
    use crate::value::Value;

    #[test]
    fn test_defaults() {
        let config = EvalConfig::new();
        assert_eq!(config.max_depth, 256);
        assert_eq!(config.regex_cache_capacity, 128);
    }

    #[test]
    fn test_from_json() -> Result<()> {
        let config = EvalConfig::from_json(r#"{"max_depth": 16}"#)?;
        assert_eq!(config.max_depth, 16);
        assert_eq!(config.regex_cache_capacity, 128);

        let config = EvalConfig::from_json("{}")?;
        assert_eq!(config, EvalConfig::default());
        Ok(())
    }

    #[test]
    fn test_install_sets_cache_capacity() {
        EvalConfig::default().install();
        assert_eq!(
            RegexCache::global().capacity(),
            DEFAULT_REGEX_CACHE_CAPACITY
        );
    }

    #[test]
    fn test_evaluators_leave_cache_capacity_alone() {
        let config = EvalConfig {
            regex_cache_capacity: 7,
            ..EvalConfig::default()
        };
        let params = Params::new();
        let evaluator = ExpressionEvaluator::with_config(&params, &config);
        assert!(evaluator.evaluate(&Expression::literal(Value::from(1))).is_ok());

        assert_eq!(
            RegexCache::global().capacity(),
            DEFAULT_REGEX_CACHE_CAPACITY
        );
    }

    #[test]
    fn test_from_json_rejects_bad_input() {
        let err = EvalConfig::from_json(r#"{"max_depth": "deep"}"#).unwrap_err();
        assert!(err
            .to_string()
            .contains("Failed to parse evaluator configuration"));
    }
}
