//! Error types for expression evaluation.

use crate::value::Kind;
use thiserror::Error;

/// Errors that can occur during expression evaluation.
///
/// Comparisons never fail; these cover the operations that have no
/// meaningful value to fall back to.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    /// Binary operator applied to a kind pair it has no rule for
    #[error("Invalid operand types for operator {operator}: left={left}, right={right}")]
    InvalidOperandTypes {
        operator: String,
        left: Kind,
        right: Kind,
    },

    /// Unary operator applied to a kind it has no rule for
    #[error("Invalid operand type for operator {operator}: {operand}")]
    InvalidOperandType { operator: String, operand: Kind },

    #[error("Division by zero")]
    DivisionByZero,

    /// Datetime arithmetic left the representable range
    #[error("Datetime arithmetic overflow in {operator}")]
    DatetimeOverflow { operator: String },

    #[error("Unknown function: {name}")]
    UnknownFunction { name: String },

    #[error("Function {function} expects {expected} arguments, got {actual}")]
    FunctionArgumentCount {
        function: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid regular expression /{pattern}/: {reason}")]
    InvalidRegex { pattern: String, reason: String },

    /// Expression tree nested deeper than the configured limit
    #[error("Expression nesting exceeds the limit of {limit}")]
    DepthLimitExceeded { limit: usize },
}

impl ExpressionError {
    /// Whether the error only means an operator had no result for its
    /// operands, as opposed to a malformed or over-deep expression.
    pub fn is_operand_error(&self) -> bool {
        matches!(
            self,
            ExpressionError::InvalidOperandTypes { .. }
                | ExpressionError::InvalidOperandType { .. }
                | ExpressionError::DivisionByZero
                | ExpressionError::DatetimeOverflow { .. }
        )
    }
}

/// Result type for expression operations
pub type ExpressionResult<T> = Result<T, ExpressionError>;
