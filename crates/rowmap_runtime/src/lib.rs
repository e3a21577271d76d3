//! Runtime support for rowmap-generated mapper code.
//!
//! Generated mappers never use reflection: every assignment is compiled into a
//! direct branch. What they do need at runtime is a small shared vocabulary —
//! the dynamically-typed [`Value`] cell that tabular drivers hand back, the
//! [`RowSource`] cursor they drain, and the checked conversions that bridge
//! driver-chosen concrete types to declared field types. This crate provides
//! exactly that vocabulary and nothing else.

#![deny(clippy::unwrap_used)]

pub mod convert;
pub mod errors;
pub mod row;
pub mod testing;
pub mod value;

pub use convert::FromValue;
pub use errors::ConversionError;
pub use row::RowSource;
pub use testing::MemoryRows;
pub use value::Value;
