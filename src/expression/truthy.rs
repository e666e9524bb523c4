//! Truthiness: the logical verdict of a bare value used as a condition.

use crate::value::Value;

/// Whether a value counts as true when used as a `WHERE` condition or as
/// an operand of `AND`/`OR`.
///
/// Numbers are true only when strictly positive; zero and negatives are
/// false. The absence sentinels are always false.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.is_positive(),
        Value::String(s) => !s.is_empty(),
        Value::Datetime(_) | Value::Thing(_) | Value::Regex(_) => true,
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Void | Value::Null | Value::Empty => false,
    }
}
