//! Expression evaluation implementation.

use crate::config::EvalConfig;
use crate::expression::context::{Context, Params, RecordContext};
use crate::expression::{
    arithmetic, compare, function, truthy, BinaryOperator, Expression, ExpressionError,
    ExpressionResult, FieldPath,
};
use crate::value::{Object, Value};
use std::fmt;

/// Evaluator for expressions
pub struct ExpressionEvaluator<'a> {
    /// Where variables and record fields are resolved
    context: &'a dyn Context,
    /// Deepest nesting the evaluator will descend into
    max_depth: usize,
}

impl<'a> ExpressionEvaluator<'a> {
    /// Create a new evaluator with default limits
    pub fn new(context: &'a dyn Context) -> Self {
        Self::with_config(context, &EvalConfig::default())
    }

    /// Create a new evaluator with explicit limits.
    ///
    /// Reads `max_depth`; the pattern cache capacity is applied by
    /// [`EvalConfig::install`].
    pub fn with_config(context: &'a dyn Context, config: &EvalConfig) -> Self {
        Self {
            context,
            max_depth: config.max_depth,
        }
    }

    /// Evaluate an expression and return the result
    pub fn evaluate(&self, expr: &Expression) -> ExpressionResult<Value> {
        self.evaluate_at(expr, 0)
    }

    fn evaluate_at(&self, expr: &Expression, depth: usize) -> ExpressionResult<Value> {
        if depth >= self.max_depth {
            return Err(ExpressionError::DepthLimitExceeded {
                limit: self.max_depth,
            });
        }
        let next = depth + 1;

        let value = match expr {
            Expression::Literal(lit) => lit.value.clone(),

            Expression::Param(name) => self.context.resolve(name),

            Expression::Field(path) => self.evaluate_field(path),

            Expression::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|item| self.evaluate_at(item, next))
                    .collect::<ExpressionResult<Vec<_>>>()?,
            ),

            Expression::Object(entries) => {
                let mut map = Object::new();
                for (key, item) in entries {
                    map.insert(key.clone(), self.evaluate_at(item, next)?);
                }
                Value::Object(map)
            }

            Expression::BinaryOp { op, left, right } => {
                self.evaluate_binary_op(*op, left, right, next)?
            }

            Expression::UnaryOp { op, operand } => {
                let operand_val = self.evaluate_at(operand, next)?;
                without_result(*op, arithmetic::calculate_unary(*op, operand_val))?
            }

            Expression::FunctionCall { name, args } => {
                let args = args
                    .iter()
                    .map(|arg| self.evaluate_at(arg, next))
                    .collect::<ExpressionResult<Vec<_>>>()?;
                function::call(name, args)?
            }
        };

        log::trace!("evaluated {:?} at depth {} to {}", expr, depth, value);
        Ok(value)
    }

    /// Evaluate a field reference against the current record
    fn evaluate_field(&self, path: &FieldPath) -> Value {
        self.context
            .current_record()
            .and_then(|record| path.lookup(record))
            .cloned()
            .unwrap_or(Value::Void)
    }

    /// Evaluate a binary operation
    fn evaluate_binary_op(
        &self,
        op: BinaryOperator,
        left: &Expression,
        right: &Expression,
        depth: usize,
    ) -> ExpressionResult<Value> {
        // Logical operators short-circuit on the left operand
        match op {
            BinaryOperator::And => {
                if !truthy(&self.evaluate_at(left, depth)?) {
                    return Ok(Value::Bool(false));
                }
                return Ok(Value::Bool(truthy(&self.evaluate_at(right, depth)?)));
            }
            BinaryOperator::Or => {
                if truthy(&self.evaluate_at(left, depth)?) {
                    return Ok(Value::Bool(true));
                }
                return Ok(Value::Bool(truthy(&self.evaluate_at(right, depth)?)));
            }
            _ => {}
        }

        let left_val = self.evaluate_at(left, depth)?;
        let right_val = self.evaluate_at(right, depth)?;

        if op.is_arithmetic() {
            without_result(op, arithmetic::calculate(op, left_val, right_val))
        } else {
            Ok(Value::Bool(compare::compare(op, &left_val, &right_val)))
        }
    }
}

/// An operator with no result for its operands yields VOID, so the failure
/// stays inside its own subtree and the enclosing comparison or logical
/// operator still decides.
fn without_result(
    op: impl fmt::Display,
    result: ExpressionResult<Value>,
) -> ExpressionResult<Value> {
    match result {
        Err(err) if err.is_operand_error() => {
            log::debug!("Operator {} produced no value: {}", op, err);
            Ok(Value::Void)
        }
        other => other,
    }
}

/// Helper function to evaluate an expression in a context
pub fn evaluate(expr: &Expression, context: &dyn Context) -> ExpressionResult<Value> {
    ExpressionEvaluator::new(context).evaluate(expr)
}

/// Type alias for predicate functions
pub type Predicate = Box<dyn Fn(&Object) -> bool + Send + Sync + 'static>;

/// Helper function to create a predicate function from an expression.
///
/// The predicate holds when the expression evaluates to a truthy value.
/// An evaluation error makes the record non-matching.
pub fn expression_to_predicate(expr: Expression, params: Params) -> Predicate {
    expression_to_predicate_with_config(expr, params, EvalConfig::default())
}

/// Like [`expression_to_predicate`], with explicit evaluator limits
pub fn expression_to_predicate_with_config(
    expr: Expression,
    params: Params,
    config: EvalConfig,
) -> Predicate {
    Box::new(move |record: &Object| {
        let ctx = RecordContext::new(&params, record);
        match ExpressionEvaluator::with_config(&ctx, &config).evaluate(&expr) {
            Ok(value) => truthy(&value),
            Err(err) => {
                log::debug!("Predicate treated as false: {}", err);
                false
            }
        }
    })
}
