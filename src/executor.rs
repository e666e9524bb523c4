//! Executor layer for record filtering.
//!
//! This module implements the Volcano-style iterator model. Each executor
//! produces records one at a time via the `next()` method, so a `WHERE`
//! clause can be applied to a stream without materializing it.

use crate::value::Object;
use anyhow::Result;

pub mod filter;
pub mod values;

pub use filter::FilterExecutor;
pub use values::ValuesExecutor;

/// Trait for all record executors
pub trait Executor: Send {
    /// Initialize the executor. This must be called before `next()`.
    fn init(&mut self) -> Result<()>;

    /// Get the next record from the executor.
    /// Returns None when there are no more records.
    fn next(&mut self) -> Result<Option<Object>>;
}

/// Drain an executor, initializing it first
pub fn collect_all(executor: &mut dyn Executor) -> Result<Vec<Object>> {
    executor.init()?;
    let mut records = Vec::new();
    while let Some(record) = executor.next()? {
        records.push(record);
    }
    Ok(records)
}
