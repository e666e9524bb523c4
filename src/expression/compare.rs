//! Comparison operators: equality, ordering, membership, set inclusion
//! and pattern matching.
//!
//! Every function here is total. A kind pair with no rule, or a coercion
//! that fails, yields `false` so that one odd field cannot abort the rest
//! of a `WHERE` clause.

use crate::expression::coerce::{self, CoercionResult};
use crate::expression::operator::BinaryOperator;
use crate::value::{Regex, Value};
use std::cmp::Ordering;

/// How many elements of an array must match a pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    /// Non-empty and every element matches (`=`)
    MatchAll,
    /// No element matches (`!=`)
    MatchNone,
    /// At least one element matches (`?=`)
    MatchAny,
}

/// Evaluate a comparison operator
pub fn compare(op: BinaryOperator, left: &Value, right: &Value) -> bool {
    match op {
        BinaryOperator::Eq => equals(left, right),
        BinaryOperator::Ne => not_equals(left, right),
        BinaryOperator::AnyEq => any_equals(left, right),
        BinaryOperator::AllEq => all_equals(left, right),

        BinaryOperator::Lt => ordered(left, right, |ord| ord == Ordering::Less),
        BinaryOperator::Le => ordered(left, right, |ord| ord != Ordering::Greater),
        BinaryOperator::Gt => ordered(left, right, |ord| ord == Ordering::Greater),
        BinaryOperator::Ge => ordered(left, right, |ord| ord != Ordering::Less),

        BinaryOperator::Inside => inside(left, right),
        BinaryOperator::NotInside => !inside(left, right),
        BinaryOperator::Contains => inside(right, left),
        BinaryOperator::NotContains => !inside(right, left),

        BinaryOperator::Subset => subset(left, right),
        BinaryOperator::ProperSubset => proper_subset(left, right),
        BinaryOperator::NotProperSubset => !proper_subset(left, right),
        BinaryOperator::Superset => subset(right, left),
        BinaryOperator::ProperSuperset => proper_subset(right, left),
        BinaryOperator::NotProperSuperset => !proper_subset(right, left),

        BinaryOperator::Add
        | BinaryOperator::Sub
        | BinaryOperator::Mul
        | BinaryOperator::Div
        | BinaryOperator::And
        | BinaryOperator::Or => {
            log::debug!("{} is not a comparison operator", op);
            false
        }
    }
}

/// The `=` operator.
///
/// The absence-sentinel table is consulted first, then a pattern on either
/// side switches to matching, and everything else compares structurally
/// after scalar coercion.
pub fn equals(left: &Value, right: &Value) -> bool {
    if let Some(verdict) = sentinel_equals(left, right) {
        return verdict;
    }
    match (left, right) {
        (Value::Regex(a), Value::Regex(b)) => a == b,
        (Value::Array(items), Value::Regex(re)) | (Value::Regex(re), Value::Array(items)) => {
            quantified_match(re, items, Quantifier::MatchAll)
        }
        (target, Value::Regex(re)) | (Value::Regex(re), target) => pattern_match(re, target),
        _ => loose_equals(left, right),
    }
}

/// The `!=` operator.
///
/// The exact negation of `=`, except that an array against a pattern asks
/// whether no element matches.
pub fn not_equals(left: &Value, right: &Value) -> bool {
    if let Some(verdict) = sentinel_equals(left, right) {
        return !verdict;
    }
    match (left, right) {
        (Value::Array(items), Value::Regex(re)) | (Value::Regex(re), Value::Array(items)) => {
            quantified_match(re, items, Quantifier::MatchNone)
        }
        _ => !equals(left, right),
    }
}

/// The `?=` operator: some element of an array equals the other side
pub fn any_equals(left: &Value, right: &Value) -> bool {
    if let Some(verdict) = sentinel_equals(left, right) {
        return verdict;
    }
    match (left, right) {
        (Value::Array(items), Value::Regex(re)) | (Value::Regex(re), Value::Array(items)) => {
            quantified_match(re, items, Quantifier::MatchAny)
        }
        (Value::Array(items), other) => items.iter().any(|item| equals(item, other)),
        _ => equals(left, right),
    }
}

/// The `*=` operator: a non-empty array whose every element equals the other side
pub fn all_equals(left: &Value, right: &Value) -> bool {
    if let Some(verdict) = sentinel_equals(left, right) {
        return verdict;
    }
    match (left, right) {
        (Value::Array(items), Value::Regex(re)) | (Value::Regex(re), Value::Array(items)) => {
            quantified_match(re, items, Quantifier::MatchAll)
        }
        (Value::Array(items), other) => {
            !items.is_empty() && items.iter().all(|item| equals(item, other))
        }
        _ => equals(left, right),
    }
}

/// Equality involving VOID, NULL or EMPTY, or `None` when neither side is one.
///
/// | left \ right | VOID  | NULL  | EMPTY | ""    | [] / {} |
/// |--------------|-------|-------|-------|-------|---------|
/// | VOID         | true  | false | true  | false | false   |
/// | NULL         | false | true  | true  | false | false   |
/// | EMPTY        | true  | true  | true  | false | true    |
///
/// The table is symmetric. Any other value against a sentinel is false.
fn sentinel_equals(left: &Value, right: &Value) -> Option<bool> {
    let verdict = match (left, right) {
        (Value::Void, Value::Void) | (Value::Null, Value::Null) | (Value::Empty, Value::Empty) => {
            true
        }
        (Value::Void, Value::Empty)
        | (Value::Empty, Value::Void)
        | (Value::Null, Value::Empty)
        | (Value::Empty, Value::Null) => true,
        (Value::Void, Value::Null) | (Value::Null, Value::Void) => false,
        (Value::Empty, other @ (Value::Array(_) | Value::Object(_)))
        | (other @ (Value::Array(_) | Value::Object(_)), Value::Empty) => {
            other.is_empty_container()
        }
        (Value::Void | Value::Null | Value::Empty, _)
        | (_, Value::Void | Value::Null | Value::Empty) => false,
        _ => return None,
    };
    Some(verdict)
}

/// Same-kind structural equality plus scalar coercions, no patterns and no
/// sentinel table.
fn loose_equals(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Datetime(a), Value::Datetime(b)) => a == b,
        (Value::Regex(a), Value::Regex(b)) => a == b,
        (Value::Thing(a), Value::Thing(b)) => a == b,
        (Value::Array(_), Value::Array(_)) | (Value::Object(_), Value::Object(_)) => {
            left.structural_eq(right)
        }

        (Value::Bool(b), Value::Number(n)) | (Value::Number(n), Value::Bool(b)) => {
            coerce::bool_to_number(*b) == *n
        }
        (Value::Bool(b), Value::String(s)) | (Value::String(s), Value::Bool(b)) => {
            coerced(coerce::parse_bool(s), |parsed| parsed == *b)
        }
        (Value::Number(n), Value::String(s)) | (Value::String(s), Value::Number(n)) => {
            coerced(coerce::parse_number(s), |parsed| parsed == *n)
        }
        (Value::Thing(t), Value::String(s)) | (Value::String(s), Value::Thing(t)) => {
            coerce::thing_to_string(t) == *s
        }
        (Value::Datetime(dt), other @ (Value::String(_) | Value::Number(_)))
        | (other @ (Value::String(_) | Value::Number(_)), Value::Datetime(dt)) => {
            coerced(coerce::to_datetime(other), |parsed| parsed == *dt)
        }

        _ => false,
    }
}

/// Equality used by membership and set inclusion.
///
/// Sentinels only match the identical sentinel, so `NULL ∈ [NULL]` holds
/// but `EMPTY ∈ [NULL]` does not.
pub fn member_equals(left: &Value, right: &Value) -> bool {
    if left.is_sentinel() || right.is_sentinel() {
        return left.structural_eq(right);
    }
    loose_equals(left, right)
}

fn coerced<T>(result: CoercionResult<T>, check: impl FnOnce(T) -> bool) -> bool {
    match result {
        Ok(value) => check(value),
        Err(err) => {
            log::debug!("Comparison treated as false: {}", err);
            false
        }
    }
}

/// Match a pattern against the textual form of a scalar
pub fn pattern_match(re: &Regex, target: &Value) -> bool {
    match target.as_raw_string() {
        Some(text) => re.is_match(&text),
        None => false,
    }
}

/// Match a pattern against every element of an array.
///
/// An empty array satisfies only [`Quantifier::MatchNone`].
pub fn quantified_match(re: &Regex, items: &[Value], quantifier: Quantifier) -> bool {
    let matched = items.iter().filter(|item| pattern_match(re, item)).count();
    match quantifier {
        Quantifier::MatchAll => !items.is_empty() && matched == items.len(),
        Quantifier::MatchNone => matched == 0,
        Quantifier::MatchAny => matched > 0,
    }
}

/// Ordering between two values, `None` when they are incomparable.
///
/// Same-kind numbers, strings, datetimes and things order naturally; a
/// datetime also orders against anything coercible to a datetime.
pub fn ordering(left: &Value, right: &Value) -> Option<Ordering> {
    if let Some(ord) = left.compare_order(right) {
        return Some(ord);
    }
    match (left, right) {
        (Value::Datetime(dt), other @ (Value::String(_) | Value::Number(_))) => {
            coerce::to_datetime(other).ok().map(|parsed| dt.cmp(&parsed))
        }
        (other @ (Value::String(_) | Value::Number(_)), Value::Datetime(dt)) => {
            coerce::to_datetime(other).ok().map(|parsed| parsed.cmp(dt))
        }
        _ => None,
    }
}

fn ordered(left: &Value, right: &Value, accept: impl FnOnce(Ordering) -> bool) -> bool {
    ordering(left, right).map(accept).unwrap_or(false)
}

/// `needle ∈ haystack`: an element of an array, or a substring of a string.
///
/// Sentinels are never containers.
pub fn inside(needle: &Value, haystack: &Value) -> bool {
    match (needle, haystack) {
        (_, Value::Array(items)) => items.iter().any(|item| member_equals(needle, item)),
        (Value::String(part), Value::String(whole)) => whole.contains(part.as_str()),
        _ => false,
    }
}

/// `left ⊆ right` over two arrays treated as sets
pub fn subset(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Array(small), Value::Array(large)) => small
            .iter()
            .all(|item| large.iter().any(|other| member_equals(item, other))),
        _ => false,
    }
}

/// `left ⊂ right`: inclusion holds and the two sets differ
pub fn proper_subset(left: &Value, right: &Value) -> bool {
    subset(left, right) && !subset(right, left)
}
