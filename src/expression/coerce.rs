//! On-demand conversions between value kinds.
//!
//! Nothing here mutates a stored value: each function produces the
//! converted form for the single operation that asked for it. A failed
//! conversion is reported as a [`CoercionError`] and the caller decides
//! what that means; comparisons treat it as "not equal".

use crate::value::{Kind, Number, Thing, Value};
use chrono::{DateTime, TimeZone, Utc};
use thiserror::Error;

/// Textual layout of the long datetime form, `1987-06-22 08:30:30.511 +0000`
const LONG_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f %z";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoercionError {
    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("'{0}' is not a boolean")]
    NotABool(String),

    #[error("'{0}' is not a datetime")]
    NotADatetime(String),

    #[error("{0} is outside the datetime range")]
    OutOfRange(String),

    #[error("cannot convert {from} to {to}")]
    Unsupported { from: Kind, to: Kind },
}

pub type CoercionResult<T> = Result<T, CoercionError>;

/// `true → 1`, `false → 0`
pub fn bool_to_number(value: bool) -> Number {
    Number::Int(value as i64)
}

/// Standard numeric parse: integer first, then float
pub fn parse_number(text: &str) -> CoercionResult<Number> {
    let trimmed = text.trim();
    if let Ok(i) = trimmed.parse::<i64>() {
        return Ok(Number::Int(i));
    }
    match trimmed.parse::<f64>() {
        Ok(f) => Ok(Number::Float(f)),
        Err(_) => Err(CoercionError::NotANumber(text.to_string())),
    }
}

pub fn parse_bool(text: &str) -> CoercionResult<bool> {
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(CoercionError::NotABool(text.to_string()))
    }
}

/// Parse RFC 3339 or the long `YYYY-MM-DD HH:MM:SS[.fff] ±ZZZZ [ZONE]` form
pub fn parse_datetime(text: &str) -> CoercionResult<DateTime<Utc>> {
    let trimmed = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    let fields: Vec<&str> = trimmed.split_whitespace().collect();
    let long = match fields.as_slice() {
        [date, time, offset] => format!("{} {} {}", date, time, offset),
        [date, time, offset, zone] if zone.chars().all(|c| c.is_ascii_alphabetic()) => {
            format!("{} {} {}", date, time, offset)
        }
        _ => return Err(CoercionError::NotADatetime(text.to_string())),
    };

    DateTime::parse_from_str(&long, LONG_DATETIME_FORMAT)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| CoercionError::NotADatetime(text.to_string()))
}

/// Reinterpret a number as nanoseconds since the Unix epoch
pub fn nanos_to_datetime(number: Number) -> CoercionResult<DateTime<Utc>> {
    let nanos = match number {
        Number::Int(i) => i,
        Number::Float(f) if f.is_finite() && f >= i64::MIN as f64 && f <= i64::MAX as f64 => {
            f as i64
        }
        Number::Float(f) => return Err(CoercionError::OutOfRange(f.to_string())),
    };
    Ok(Utc.timestamp_nanos(nanos))
}

pub fn thing_to_string(thing: &Thing) -> String {
    thing.to_string()
}

/// Convert for numeric use: numbers, booleans and numeric strings
pub fn to_number(value: &Value) -> CoercionResult<Number> {
    match value {
        Value::Number(n) => Ok(*n),
        Value::Bool(b) => Ok(bool_to_number(*b)),
        Value::String(s) => parse_number(s),
        other => Err(CoercionError::Unsupported {
            from: other.kind(),
            to: Kind::Number,
        }),
    }
}

/// Convert for comparison against a datetime
pub fn to_datetime(value: &Value) -> CoercionResult<DateTime<Utc>> {
    match value {
        Value::Datetime(dt) => Ok(*dt),
        Value::String(s) => parse_datetime(s),
        Value::Number(n) => nanos_to_datetime(*n),
        other => Err(CoercionError::Unsupported {
            from: other.kind(),
            to: Kind::Datetime,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timer() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("1987-06-22T08:30:30.511Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_bool_to_number() {
        assert_eq!(bool_to_number(true), Number::Int(1));
        assert_eq!(bool_to_number(false), Number::Int(0));
    }

    #[test]
    fn test_parse_number() {
        assert!(matches!(parse_number("1"), Ok(Number::Int(1))));
        assert!(matches!(parse_number("1.1"), Ok(Number::Float(f)) if f == 1.1));
        assert!(matches!(parse_number(" -3 "), Ok(Number::Int(-3))));
        assert_eq!(
            parse_number("abc"),
            Err(CoercionError::NotANumber("abc".to_string()))
        );
        assert!(parse_number("").is_err());
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("true"), Ok(true));
        assert_eq!(parse_bool("FALSE"), Ok(false));
        assert!(parse_bool("yes").is_err());
    }

    #[test]
    fn test_parse_datetime_forms() {
        assert_eq!(parse_datetime("1987-06-22T08:30:30.511Z"), Ok(timer()));
        assert_eq!(
            parse_datetime("1987-06-22 08:30:30.511 +0000 UTC"),
            Ok(timer())
        );
        assert_eq!(parse_datetime("1987-06-22 08:30:30.511 +0000"), Ok(timer()));
        assert_eq!(
            parse_datetime("1987-06-22 09:30:30.511 +0100 BST"),
            Ok(timer())
        );
        assert!(parse_datetime("yesterday").is_err());
        assert!(parse_datetime("1987-06-22 08:30:30 +0000 U7C").is_err());
    }

    #[test]
    fn test_nanos_to_datetime() {
        assert_eq!(
            nanos_to_datetime(Number::Int(551349030511000000)),
            Ok(timer())
        );
        assert!(nanos_to_datetime(Number::Float(f64::INFINITY)).is_err());
    }

    #[test]
    fn test_to_number() {
        assert_eq!(to_number(&Value::from(true)), Ok(Number::Int(1)));
        assert_eq!(to_number(&Value::from("2")), Ok(Number::Int(2)));
        assert_eq!(
            to_number(&Value::Null),
            Err(CoercionError::Unsupported {
                from: Kind::Null,
                to: Kind::Number
            })
        );
    }

    #[test]
    fn test_to_datetime() {
        assert_eq!(to_datetime(&Value::Datetime(timer())), Ok(timer()));
        assert_eq!(
            to_datetime(&Value::from("1987-06-22T08:30:30.511Z")),
            Ok(timer())
        );
        assert_eq!(to_datetime(&Value::from(551349030511000000i64)), Ok(timer()));
        assert!(to_datetime(&Value::from(true)).is_err());
    }

    #[test]
    fn test_thing_to_string() {
        assert_eq!(thing_to_string(&Thing::new("person", "test")), "person:test");
    }
}
