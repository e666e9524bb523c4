//! Arithmetic operators `+ - * /` and the unary operators.

use crate::expression::coerce;
use crate::expression::error::{ExpressionError, ExpressionResult};
use crate::expression::operator::{BinaryOperator, UnaryOperator};
use crate::expression::truthy::truthy;
use crate::value::{Kind, Number, Value};
use chrono::{DateTime, TimeDelta, Utc};

/// Apply an arithmetic operator to two evaluated operands.
///
/// Kind pairs without a rule are reported as errors here; the evaluator
/// turns them into VOID.
pub fn calculate(op: BinaryOperator, left: Value, right: Value) -> ExpressionResult<Value> {
    // Absence passes through untouched, left first
    if left.is_sentinel() {
        return Ok(left);
    }
    if right.is_sentinel() {
        return Ok(right);
    }

    match (op, left, right) {
        (op, Value::Number(a), Value::Number(b)) => numeric(op, a, b),
        (op, Value::Bool(a), Value::Number(b)) => numeric(op, coerce::bool_to_number(a), b),
        (op, Value::Number(a), Value::Bool(b)) => numeric(op, a, coerce::bool_to_number(b)),
        (op, Value::Bool(a), Value::Bool(b)) => {
            numeric(op, coerce::bool_to_number(a), coerce::bool_to_number(b))
        }

        (BinaryOperator::Add, Value::String(mut a), Value::String(b)) => {
            a.push_str(&b);
            Ok(Value::String(a))
        }
        (BinaryOperator::Add, Value::Array(mut a), Value::Array(b)) => {
            a.extend(b);
            Ok(Value::Array(a))
        }
        (BinaryOperator::Add, Value::Object(mut a), Value::Object(b)) => {
            a.extend(b);
            Ok(Value::Object(a))
        }

        (BinaryOperator::Add, Value::Datetime(dt), Value::Number(n))
        | (BinaryOperator::Add, Value::Number(n), Value::Datetime(dt)) => {
            shift(dt, n, false).map(Value::Datetime)
        }
        (BinaryOperator::Sub, Value::Datetime(dt), Value::Number(n)) => {
            shift(dt, n, true).map(Value::Datetime)
        }
        (BinaryOperator::Sub, Value::Datetime(a), Value::Datetime(b)) => a
            .signed_duration_since(b)
            .num_nanoseconds()
            .map(|nanos| Value::Number(Number::Int(nanos)))
            .ok_or_else(|| ExpressionError::DatetimeOverflow {
                operator: op.to_string(),
            }),

        (op, left, right) => Err(ExpressionError::InvalidOperandTypes {
            operator: op.to_string(),
            left: left.kind(),
            right: right.kind(),
        }),
    }
}

fn numeric(op: BinaryOperator, a: Number, b: Number) -> ExpressionResult<Value> {
    let result = match op {
        BinaryOperator::Add => a + b,
        BinaryOperator::Sub => a - b,
        BinaryOperator::Mul => a * b,
        BinaryOperator::Div => a.checked_div(b).ok_or(ExpressionError::DivisionByZero)?,
        _ => {
            return Err(ExpressionError::InvalidOperandTypes {
                operator: op.to_string(),
                left: Kind::Number,
                right: Kind::Number,
            })
        }
    };
    Ok(Value::Number(result))
}

fn shift(dt: DateTime<Utc>, nanos: Number, backwards: bool) -> ExpressionResult<DateTime<Utc>> {
    let overflow = || ExpressionError::DatetimeOverflow {
        operator: if backwards { "-" } else { "+" }.to_string(),
    };
    let nanos = match nanos {
        Number::Int(i) => i,
        Number::Float(f) if f.is_finite() && f >= i64::MIN as f64 && f <= i64::MAX as f64 => {
            f as i64
        }
        Number::Float(_) => return Err(overflow()),
    };
    let delta = TimeDelta::nanoseconds(nanos);
    let shifted = if backwards {
        dt.checked_sub_signed(delta)
    } else {
        dt.checked_add_signed(delta)
    };
    shifted.ok_or_else(overflow)
}

/// Apply a unary operator to an evaluated operand
pub fn calculate_unary(op: UnaryOperator, operand: Value) -> ExpressionResult<Value> {
    match (op, operand) {
        (UnaryOperator::Not, value) => Ok(Value::Bool(!truthy(&value))),
        (_, value) if value.is_sentinel() => Ok(value),
        (UnaryOperator::Minus, Value::Number(n)) => Ok(Value::Number(-n)),
        (UnaryOperator::Minus, Value::Bool(b)) => Ok(Value::Number(-coerce::bool_to_number(b))),
        (UnaryOperator::Plus, Value::Number(n)) => Ok(Value::Number(n)),
        (UnaryOperator::Plus, Value::Bool(b)) => Ok(Value::Number(coerce::bool_to_number(b))),
        (op, value) => Err(ExpressionError::InvalidOperandType {
            operator: op.to_string(),
            operand: value.kind(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Object, Regex};

    fn timer() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("1987-06-22T08:30:30.511Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_number_arithmetic() {
        assert_eq!(
            calculate(BinaryOperator::Add, Value::from(1), Value::from(2)).unwrap(),
            Value::from(3)
        );
        assert_eq!(
            calculate(BinaryOperator::Sub, Value::from(1), Value::from(2)).unwrap(),
            Value::from(-1)
        );
        assert_eq!(
            calculate(BinaryOperator::Mul, Value::from(1.5), Value::from(2)).unwrap(),
            Value::from(3.0)
        );
        assert!(matches!(
            calculate(BinaryOperator::Div, Value::from(6), Value::from(3)).unwrap(),
            Value::Number(Number::Int(2))
        ));
        assert!(matches!(
            calculate(BinaryOperator::Div, Value::from(1), Value::from(2)).unwrap(),
            Value::Number(Number::Float(f)) if f == 0.5
        ));
    }

    #[test]
    fn test_overflow_promotes_to_float() {
        let result = calculate(BinaryOperator::Add, Value::from(i64::MAX), Value::from(1)).unwrap();
        assert!(matches!(result, Value::Number(Number::Float(_))));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(
            calculate(BinaryOperator::Div, Value::from(1), Value::from(0)),
            Err(ExpressionError::DivisionByZero)
        );
        assert_eq!(
            calculate(BinaryOperator::Div, Value::from(1.0), Value::from(false)),
            Err(ExpressionError::DivisionByZero)
        );
    }

    #[test]
    fn test_bool_coerces_to_number() {
        assert_eq!(
            calculate(BinaryOperator::Add, Value::from(0), Value::from(true)).unwrap(),
            Value::from(1)
        );
        assert_eq!(
            calculate(BinaryOperator::Add, Value::from(0), Value::from(false)).unwrap(),
            Value::from(0)
        );
        assert_eq!(
            calculate(BinaryOperator::Add, Value::from(true), Value::from(true)).unwrap(),
            Value::from(2)
        );
    }

    #[test]
    fn test_container_concatenation() {
        let result = calculate(BinaryOperator::Add, Value::Array(vec![]), Value::Array(vec![]));
        assert_eq!(result.unwrap(), Value::Array(vec![]));

        let result = calculate(
            BinaryOperator::Add,
            Value::Array(vec![Value::from(1)]),
            Value::Array(vec![Value::from(2)]),
        );
        assert_eq!(
            result.unwrap(),
            Value::Array(vec![Value::from(1), Value::from(2)])
        );

        let result = calculate(
            BinaryOperator::Add,
            Value::Object(Object::new()),
            Value::Object(Object::new()),
        );
        assert_eq!(result.unwrap(), Value::Object(Object::new()));

        let left = Value::from(serde_json::json!({"a": 1, "b": 1}));
        let right = Value::from(serde_json::json!({"b": 2, "c": 3}));
        assert_eq!(
            calculate(BinaryOperator::Add, left, right).unwrap(),
            Value::from(serde_json::json!({"a": 1, "b": 2, "c": 3}))
        );

        assert_eq!(
            calculate(BinaryOperator::Add, Value::from("ab"), Value::from("cd")).unwrap(),
            Value::from("abcd")
        );
    }

    #[test]
    fn test_datetime_arithmetic() {
        let later = calculate(
            BinaryOperator::Add,
            Value::Datetime(timer()),
            Value::from(1_000_000_000),
        )
        .unwrap();
        assert_eq!(later, Value::Datetime(timer() + TimeDelta::seconds(1)));

        let earlier = calculate(
            BinaryOperator::Sub,
            Value::Datetime(timer()),
            Value::from(1_000_000_000),
        )
        .unwrap();
        assert_eq!(earlier, Value::Datetime(timer() - TimeDelta::seconds(1)));

        let commuted = calculate(BinaryOperator::Add, Value::from(1), Value::Datetime(timer()));
        assert!(matches!(commuted, Ok(Value::Datetime(_))));

        let diff = calculate(BinaryOperator::Sub, later, Value::Datetime(timer())).unwrap();
        assert_eq!(diff, Value::from(1_000_000_000));

        assert!(matches!(
            calculate(
                BinaryOperator::Add,
                Value::Datetime(DateTime::<Utc>::MAX_UTC),
                Value::from(i64::MAX)
            ),
            Err(ExpressionError::DatetimeOverflow { .. })
        ));
    }

    #[test]
    fn test_sentinels_pass_through() {
        assert!(calculate(BinaryOperator::Add, Value::Void, Value::from(1))
            .unwrap()
            .is_void());
        assert!(calculate(BinaryOperator::Mul, Value::from(1), Value::Null)
            .unwrap()
            .is_null());
        assert!(calculate(BinaryOperator::Sub, Value::Empty, Value::Null)
            .unwrap()
            .is_empty_literal());
    }

    #[test]
    fn test_incompatible_kinds() {
        let regex = Value::Regex(Regex::new("a").unwrap());
        assert_eq!(
            calculate(BinaryOperator::Add, regex, Value::from(1)),
            Err(ExpressionError::InvalidOperandTypes {
                operator: "+".to_string(),
                left: Kind::Regex,
                right: Kind::Number,
            })
        );
        assert!(calculate(BinaryOperator::Add, Value::from("1"), Value::from(1)).is_err());
        assert!(calculate(BinaryOperator::Mul, Value::from("a"), Value::from("b")).is_err());
        assert!(calculate(
            BinaryOperator::Sub,
            Value::Array(vec![]),
            Value::Array(vec![])
        )
        .is_err());
        assert!(calculate(
            BinaryOperator::Sub,
            Value::from(1),
            Value::Datetime(timer())
        )
        .is_err());
    }

    #[test]
    fn test_unary() {
        assert_eq!(
            calculate_unary(UnaryOperator::Not, Value::from(0)).unwrap(),
            Value::from(true)
        );
        assert_eq!(
            calculate_unary(UnaryOperator::Not, Value::from("x")).unwrap(),
            Value::from(false)
        );
        assert_eq!(
            calculate_unary(UnaryOperator::Not, Value::Void).unwrap(),
            Value::from(true)
        );
        assert_eq!(
            calculate_unary(UnaryOperator::Minus, Value::from(5)).unwrap(),
            Value::from(-5)
        );
        assert_eq!(
            calculate_unary(UnaryOperator::Minus, Value::from(true)).unwrap(),
            Value::from(-1)
        );
        assert_eq!(
            calculate_unary(UnaryOperator::Plus, Value::from(false)).unwrap(),
            Value::from(0)
        );
        assert!(calculate_unary(UnaryOperator::Minus, Value::Null)
            .unwrap()
            .is_null());
        assert_eq!(
            calculate_unary(UnaryOperator::Minus, Value::from("a")),
            Err(ExpressionError::InvalidOperandType {
                operator: "-".to_string(),
                operand: Kind::String,
            })
        );
    }
}
