//! Checked generic conversion from [`Value`] cells to scalar field types.
//!
//! This is the fallback path generated code takes when the cell's runtime kind
//! does not exactly match the declared field type: narrowing and widening are
//! both allowed, with range checks, digit-string parsing, bools as `0`/`1`,
//! and float-to-integer rounding half to even. Anything that cannot be
//! represented in the target type is a [`ConversionError`], never a wrap or a
//! truncation.

use std::fmt::Display;

use crate::errors::ConversionError;
use crate::value::Value;

/// A scalar type that can be produced from a [`Value`] by checked conversion.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Result<Self, ConversionError>;
}

/// Range-checked integer-to-integer conversion.
fn narrow<S, T>(value: S, to: &'static str) -> Result<T, ConversionError>
where
    S: Display + Copy,
    T: TryFrom<S>,
{
    T::try_from(value).map_err(|_| ConversionError::OutOfRange {
        value: value.to_string(),
        to,
    })
}

/// Float-to-integer conversion: round half to even, then range-check.
fn float_to_int<T: TryFrom<i128>>(value: f64, to: &'static str) -> Result<T, ConversionError> {
    let out_of_range = || ConversionError::OutOfRange {
        value: value.to_string(),
        to,
    };
    if !value.is_finite() {
        return Err(out_of_range());
    }
    let rounded = value.round_ties_even();
    // i128 covers every integer target; the f64 bounds check keeps the cast defined.
    if rounded < i128::MIN as f64 || rounded >= i128::MAX as f64 {
        return Err(out_of_range());
    }
    T::try_from(rounded as i128).map_err(|_| out_of_range())
}

fn parse_str<T: std::str::FromStr>(input: &str, to: &'static str) -> Result<T, ConversionError> {
    input.parse::<T>().map_err(|_| ConversionError::Parse {
        input: input.to_string(),
        to,
    })
}

macro_rules! int_from_value {
    ($($ty:ty),* $(,)?) => {$(
        impl FromValue for $ty {
            fn from_value(value: &Value) -> Result<Self, ConversionError> {
                const TO: &str = stringify!($ty);
                match value {
                    Value::Null => Err(ConversionError::NullValue { to: TO }),
                    Value::Bool(b) => Ok(if *b { 1 } else { 0 }),
                    Value::I8(v) => narrow(*v, TO),
                    Value::I16(v) => narrow(*v, TO),
                    Value::I32(v) => narrow(*v, TO),
                    Value::I64(v) => narrow(*v, TO),
                    Value::U8(v) => narrow(*v, TO),
                    Value::U16(v) => narrow(*v, TO),
                    Value::U32(v) => narrow(*v, TO),
                    Value::U64(v) => narrow(*v, TO),
                    Value::F32(v) => float_to_int(f64::from(*v), TO),
                    Value::F64(v) => float_to_int(*v, TO),
                    Value::Str(s) => parse_str(s, TO),
                    Value::Bytes(_) => Err(ConversionError::Unsupported {
                        from: value.type_name(),
                        to: TO,
                    }),
                }
            }
        }
    )*};
}

int_from_value!(i8, i16, i32, i64, u8, u16, u32, u64);

macro_rules! float_from_value {
    ($($ty:ty),* $(,)?) => {$(
        impl FromValue for $ty {
            fn from_value(value: &Value) -> Result<Self, ConversionError> {
                const TO: &str = stringify!($ty);
                match value {
                    Value::Null => Err(ConversionError::NullValue { to: TO }),
                    Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
                    Value::I8(v) => Ok(*v as $ty),
                    Value::I16(v) => Ok(*v as $ty),
                    Value::I32(v) => Ok(*v as $ty),
                    Value::I64(v) => Ok(*v as $ty),
                    Value::U8(v) => Ok(*v as $ty),
                    Value::U16(v) => Ok(*v as $ty),
                    Value::U32(v) => Ok(*v as $ty),
                    Value::U64(v) => Ok(*v as $ty),
                    Value::F32(v) => Ok(*v as $ty),
                    Value::F64(v) => Ok(*v as $ty),
                    Value::Str(s) => parse_str(s, TO),
                    Value::Bytes(_) => Err(ConversionError::Unsupported {
                        from: value.type_name(),
                        to: TO,
                    }),
                }
            }
        }
    )*};
}

float_from_value!(f32, f64);

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        const TO: &str = "bool";
        match value {
            Value::Null => Err(ConversionError::NullValue { to: TO }),
            Value::Bool(b) => Ok(*b),
            Value::I8(v) => Ok(*v != 0),
            Value::I16(v) => Ok(*v != 0),
            Value::I32(v) => Ok(*v != 0),
            Value::I64(v) => Ok(*v != 0),
            Value::U8(v) => Ok(*v != 0),
            Value::U16(v) => Ok(*v != 0),
            Value::U32(v) => Ok(*v != 0),
            Value::U64(v) => Ok(*v != 0),
            Value::F32(v) => Ok(*v != 0.0),
            Value::F64(v) => Ok(*v != 0.0),
            Value::Str(s) => {
                if s.eq_ignore_ascii_case("true") {
                    Ok(true)
                } else if s.eq_ignore_ascii_case("false") {
                    Ok(false)
                } else {
                    Err(ConversionError::Parse {
                        input: s.clone(),
                        to: TO,
                    })
                }
            }
            Value::Bytes(_) => Err(ConversionError::Unsupported {
                from: value.type_name(),
                to: TO,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widening_int_conversion() {
        assert_eq!(Value::I16(123).convert::<i32>(), Ok(123));
        assert_eq!(Value::U8(200).convert::<i64>(), Ok(200));
    }

    #[test]
    fn narrowing_int_conversion_checks_range() {
        assert_eq!(Value::I32(300).convert::<i16>(), Ok(300));
        assert_eq!(
            Value::I32(70_000).convert::<i16>(),
            Err(ConversionError::OutOfRange {
                value: "70000".to_string(),
                to: "i16",
            })
        );
        assert!(Value::I32(-1).convert::<u32>().is_err());
    }

    #[test]
    fn float_to_int_rounds_ties_to_even() {
        assert_eq!(Value::F64(2.5).convert::<i32>(), Ok(2));
        assert_eq!(Value::F64(3.5).convert::<i32>(), Ok(4));
        assert_eq!(Value::F64(-0.5).convert::<i32>(), Ok(0));
        assert!(Value::F64(f64::NAN).convert::<i32>().is_err());
    }

    #[test]
    fn string_parsing() {
        assert_eq!(Value::from("42").convert::<i32>(), Ok(42));
        assert_eq!(Value::from("2.5").convert::<f64>(), Ok(2.5));
        assert_eq!(Value::from("TRUE").convert::<bool>(), Ok(true));
        assert!(matches!(
            Value::from("nope").convert::<i32>(),
            Err(ConversionError::Parse { .. })
        ));
    }

    #[test]
    fn bool_as_zero_or_one() {
        assert_eq!(Value::Bool(true).convert::<i32>(), Ok(1));
        assert_eq!(Value::Bool(false).convert::<u8>(), Ok(0));
        assert_eq!(Value::I64(-3).convert::<bool>(), Ok(true));
        assert_eq!(Value::I64(0).convert::<bool>(), Ok(false));
    }

    #[test]
    fn null_and_bytes_are_rejected() {
        assert_eq!(
            Value::Null.convert::<i32>(),
            Err(ConversionError::NullValue { to: "i32" })
        );
        assert!(matches!(
            Value::Bytes(vec![1]).convert::<i32>(),
            Err(ConversionError::Unsupported { .. })
        ));
    }
}
