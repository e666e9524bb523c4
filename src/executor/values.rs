//! In-memory scan over a fixed list of records.

use crate::executor::Executor;
use crate::value::{Object, Value};
use anyhow::{bail, Result};

/// Executor that yields a fixed set of records in order
pub struct ValuesExecutor {
    records: Vec<Object>,
    current: usize,
    initialized: bool,
}

impl ValuesExecutor {
    pub fn new(records: Vec<Object>) -> Self {
        Self {
            records,
            current: 0,
            initialized: false,
        }
    }

    /// Build records from JSON objects. Anything that is not an object is rejected.
    pub fn from_json(rows: Vec<serde_json::Value>) -> Result<Self> {
        let mut records = Vec::with_capacity(rows.len());
        for (i, row) in rows.into_iter().enumerate() {
            match Value::from(row) {
                Value::Object(map) => records.push(map),
                other => bail!("Row {} is not an object: {}", i, other.kind()),
            }
        }
        Ok(Self::new(records))
    }
}

impl Executor for ValuesExecutor {
    fn init(&mut self) -> Result<()> {
        self.current = 0;
        self.initialized = true;
        Ok(())
    }

    fn next(&mut self) -> Result<Option<Object>> {
        if !self.initialized {
            bail!("Executor not initialized. Call init() first.");
        }

        let record = self.records.get(self.current).cloned();
        if record.is_some() {
            self.current += 1;
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_values_scan() -> Result<()> {
        let mut scan = ValuesExecutor::from_json(vec![json!({"id": 1}), json!({"id": 2})])?;
        scan.init()?;

        let first = scan.next()?.expect("Should have first record");
        assert_eq!(first.get("id"), Some(&Value::from(1)));
        let second = scan.next()?.expect("Should have second record");
        assert_eq!(second.get("id"), Some(&Value::from(2)));
        assert!(scan.next()?.is_none());
        assert!(scan.next()?.is_none());

        // init() rewinds
        scan.init()?;
        assert!(scan.next()?.is_some());

        Ok(())
    }

    #[test]
    fn test_values_not_initialized() {
        let mut scan = ValuesExecutor::new(vec![Object::new()]);
        let result = scan.next();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not initialized"));
    }

    #[test]
    fn test_values_rejects_non_objects() {
        let result = ValuesExecutor::from_json(vec![json!({"id": 1}), json!([1, 2])]);
        let err = result.err().expect("Should reject an array row");
        assert!(err.to_string().contains("Row 1 is not an object"));
    }
}
