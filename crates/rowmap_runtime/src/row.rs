//! The tabular cursor abstraction consumed by generated bulk mappers.

use crate::value::Value;

/// A forward-only cursor over one logical result set.
///
/// A generated bulk mapper drains the source in a single pass: it calls
/// [`advance`](RowSource::advance) until exhaustion, reads cells positionally
/// from the current row, and then calls [`close`](RowSource::close) exactly
/// once. Implementations must surface driver nulls as [`Value::Null`].
///
/// Multiple logical result sets are out of scope; the mapper treats the first
/// exhaustion of rows as the end of the source.
pub trait RowSource {
    /// Moves to the next row. Returns `false` when no more rows exist.
    fn advance(&mut self) -> bool;

    /// Number of columns in the result set.
    fn field_count(&self) -> usize;

    /// Column name at `index`.
    fn field_name(&self, index: usize) -> &str;

    /// Cell value at `index` in the current row, with nulls as [`Value::Null`].
    fn value(&mut self, index: usize) -> Value;

    /// Releases the underlying resources. Called once, after the last row.
    fn close(&mut self);
}
