//! Built-in functions callable from expressions.

use crate::expression::error::{ExpressionError, ExpressionResult};
use crate::value::{Number, Value};
use chrono::Utc;

/// Call a built-in function with already evaluated arguments.
///
/// Names are matched case-insensitively; `time.now` and `time::now` are
/// the same function.
pub fn call(name: &str, args: Vec<Value>) -> ExpressionResult<Value> {
    match name.to_ascii_lowercase().as_str() {
        "array" => Ok(Value::Array(args)),
        "time.now" | "time::now" => {
            expect_args(name, &args, 0)?;
            Ok(Value::Datetime(Utc::now()))
        }
        "count" => {
            expect_args(name, &args, 1)?;
            Ok(Value::Number(Number::Int(count(&args[0]))))
        }
        _ => Err(ExpressionError::UnknownFunction {
            name: name.to_string(),
        }),
    }
}

fn expect_args(name: &str, args: &[Value], expected: usize) -> ExpressionResult<()> {
    if args.len() != expected {
        return Err(ExpressionError::FunctionArgumentCount {
            function: name.to_string(),
            expected,
            actual: args.len(),
        });
    }
    Ok(())
}

fn count(value: &Value) -> i64 {
    match value {
        Value::Array(items) => items.len() as i64,
        Value::Object(map) => map.len() as i64,
        Value::Void | Value::Null | Value::Empty => 0,
        _ => 1,
    }
}
