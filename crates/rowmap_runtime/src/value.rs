//! The dynamically-typed cell handed back by a row source.
//!
//! Drivers surface column values with driver-chosen concrete types that
//! frequently do not match the declared field type (a `SMALLINT` column may
//! arrive as [`Value::I16`] while the field is `i32`). Generated code first
//! tries the exact variant as a fast path and only then falls back to the
//! checked conversions in [`crate::convert`].

use crate::convert::FromValue;
use crate::errors::ConversionError;

/// One column value from one row, with a driver null normalized to [`Value::Null`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Str(String),
    Bytes(Vec<u8>),
}

impl Value {
    /// Whether this cell is the driver-null sentinel.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short name of the contained kind, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::I8(_) => "i8",
            Value::I16(_) => "i16",
            Value::I32(_) => "i32",
            Value::I64(_) => "i64",
            Value::U8(_) => "u8",
            Value::U16(_) => "u16",
            Value::U32(_) => "u32",
            Value::U64(_) => "u64",
            Value::F32(_) => "f32",
            Value::F64(_) => "f64",
            Value::Str(_) => "string",
            Value::Bytes(_) => "bytes",
        }
    }

    /// Extracts an owned string, or `None` when the cell is null or any other kind.
    ///
    /// This is the reference-cast path: a mismatch produces `None`, never an error.
    pub fn into_string(self) -> Option<String> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts an owned byte buffer, or `None` when the cell is null or any other kind.
    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Checked generic conversion to a scalar target type.
    ///
    /// Supports sources both narrower and wider than the target; failures
    /// surface as [`ConversionError`] and are never recovered here.
    pub fn convert<T: FromValue>(&self) -> Result<T, ConversionError> {
        T::from_value(self)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

macro_rules! value_from_scalar {
    ($($variant:ident($ty:ty)),* $(,)?) => {$(
        impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                Value::$variant(v)
            }
        }
    )*};
}

value_from_scalar! {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Bytes(Vec<u8>),
}
