//! Value model for query evaluation.
//!
//! This module provides the runtime representation every expression
//! evaluates to:
//!
//! - **Value**: Tagged union over every kind a query can observe
//! - **Kind**: The discriminant of a value, used for dispatch and diagnostics
//! - **Number**: Integer or floating point number with numeric equality
//! - **Thing**: Record reference of the form `table:id`
//! - **Regex**: Compiled pattern backed by a shared compilation cache
//!
//! Values are immutable once built and carry no identity beyond
//! structural equality, so they can be shared freely across threads.

pub mod core;
pub mod number;
pub mod pattern;
pub mod thing;

pub use self::core::{Kind, Object, Value};
pub use number::Number;
pub use pattern::{Regex, RegexCache, DEFAULT_REGEX_CACHE_CAPACITY};
pub use thing::Thing;
