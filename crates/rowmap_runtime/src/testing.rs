//! In-memory row source for tests and examples.

use std::collections::VecDeque;

use crate::row::RowSource;
use crate::value::Value;

/// A [`RowSource`] backed by in-memory rows.
///
/// Tracks whether [`close`](RowSource::close) was called so tests can assert
/// the mapper's release-exactly-once contract.
#[derive(Debug, Default)]
pub struct MemoryRows {
    columns: Vec<String>,
    pending: VecDeque<Vec<Value>>,
    current: Option<Vec<Value>>,
    closed: bool,
}

impl MemoryRows {
    pub fn new<C: Into<String>>(columns: Vec<C>, rows: Vec<Vec<Value>>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            pending: rows.into(),
            current: None,
            closed: false,
        }
    }

    /// Whether the source has been released.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl RowSource for MemoryRows {
    fn advance(&mut self) -> bool {
        self.current = self.pending.pop_front();
        self.current.is_some()
    }

    fn field_count(&self) -> usize {
        self.columns.len()
    }

    fn field_name(&self, index: usize) -> &str {
        &self.columns[index]
    }

    fn value(&mut self, index: usize) -> Value {
        self.current
            .as_ref()
            .and_then(|row| row.get(index))
            .cloned()
            .unwrap_or(Value::Null)
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drains_rows_in_order() {
        let mut rows = MemoryRows::new(
            vec!["a"],
            vec![vec![Value::I32(1)], vec![Value::I32(2)]],
        );
        assert!(rows.advance());
        assert_eq!(rows.value(0), Value::I32(1));
        assert!(rows.advance());
        assert_eq!(rows.value(0), Value::I32(2));
        assert!(!rows.advance());
    }

    #[test]
    fn tracks_close() {
        let mut rows = MemoryRows::new(Vec::<String>::new(), vec![]);
        assert!(!rows.is_closed());
        rows.close();
        assert!(rows.is_closed());
    }
}
