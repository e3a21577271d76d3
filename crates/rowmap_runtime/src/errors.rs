//! Conversion error taxonomy for generated mapper code.
//!
//! Generated setters and bulk mappers never swallow a failed conversion: the
//! error propagates to the immediate caller with `?`. Silent outcomes (a
//! mismatched reference cast, a skipped nullable assignment) are expressed as
//! no-ops in the generated code itself, never as errors.

use thiserror::Error;

/// A data conversion failed while assigning a row value to a field.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// The source value kind has no conversion to the target type at all.
    #[error("cannot convert a {from} value to {to}")]
    Unsupported { from: &'static str, to: &'static str },

    /// A numeric value was convertible in principle but out of the target's range.
    #[error("value {value} is out of range for {to}")]
    OutOfRange { value: String, to: &'static str },

    /// A string value did not parse as the target type.
    #[error("cannot parse {input:?} as {to}")]
    Parse { input: String, to: &'static str },

    /// A null cell reached a conversion that requires a concrete value.
    #[error("cannot convert a null value to {to}")]
    NullValue { to: &'static str },

    /// An integer matched no discriminant of the target enum.
    #[error("no variant of {enum_name} has discriminant {value}")]
    UnknownEnumVariant { enum_name: &'static str, value: i32 },
}
