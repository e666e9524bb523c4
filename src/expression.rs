//! Expression evaluation for query predicates.
//!
//! This module provides:
//! - Expression AST representation
//! - Variable and record-field resolution contexts
//! - Truthiness, comparison and arithmetic over the value model
//! - Recursive evaluation and `WHERE` predicates

pub mod arithmetic;
pub mod coerce;
pub mod compare;
pub mod context;
pub mod error;
pub mod eval;
pub mod expr;
pub mod function;
pub mod operator;
pub mod truthy;

pub use context::{Context, Params, RecordContext};
pub use error::{ExpressionError, ExpressionResult};
pub use eval::{
    evaluate, expression_to_predicate, expression_to_predicate_with_config, ExpressionEvaluator,
    Predicate,
};
pub use expr::{Expression, FieldPath, Literal, PathPart};
pub use operator::{BinaryOperator, UnaryOperator};
pub use truthy::truthy;
