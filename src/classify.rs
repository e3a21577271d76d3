//! Assignment strategy classifier.
//!
//! Maps each property descriptor to exactly one of five assignment strategies,
//! evaluated in a fixed order: reference types, nullable non-enum value types,
//! enums (plain or nullable), then plain value types. Classification is a pure
//! function of the property's type shape and the enum declarations in the
//! table; a shape none of the strategies covers aborts generation for the
//! owning type with a diagnostic naming the property.

use std::fmt;

use crate::errors::GenError;
use crate::resolve::PropertyDescriptor;
use crate::symbols::{ScalarKind, TypeShape, TypeTable};

/// The reference-like payload kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    /// `String`
    Str,
    /// `Vec<u8>`
    Bytes,
}

/// How one property's value is converted and assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// Reference-like target: assign the matching payload; a null or
    /// mismatched cell yields `None` (nullable target) or a no-op (bare
    /// target). Never fails.
    ReferenceCast { kind: RefKind, nullable: bool },
    /// `Option<scalar>` target: null clears, an exactly-matching cell kind
    /// assigns, anything else is a silent no-op. No conversion is attempted —
    /// this asymmetry against `PrimitiveConvert` is intentional and preserved.
    NullableValue(ScalarKind),
    /// Enum target: convert the cell to `i32` (fast path when it already is
    /// one) and map it onto the enum by discriminant. Null falls through to
    /// later duplicates of the same name.
    Enum { enum_name: String },
    /// `Option<enum>` target: as `Enum`, wrapping the result in `Some`.
    NullableEnum { enum_name: String },
    /// Plain scalar target: null is a no-op; an exactly-matching cell assigns
    /// directly, anything else goes through checked conversion, whose failure
    /// propagates to the caller.
    PrimitiveConvert(ScalarKind),
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::ReferenceCast { .. } => write!(f, "ReferenceCast"),
            Strategy::NullableValue(_) => write!(f, "NullableValue"),
            Strategy::Enum { .. } => write!(f, "Enum"),
            Strategy::NullableEnum { .. } => write!(f, "NullableEnum"),
            Strategy::PrimitiveConvert(_) => write!(f, "PrimitiveConvert"),
        }
    }
}

/// Classifies one property descriptor against the completed table.
pub fn classify(
    descriptor: &PropertyDescriptor,
    table: &TypeTable,
) -> Result<Strategy, GenError> {
    let unsupported = || GenError::UnsupportedProperty {
        ty: descriptor.declared_on.clone(),
        property: descriptor.name.clone(),
        type_text: descriptor.type_text.clone(),
    };
    match &descriptor.shape {
        // 1. Reference types.
        TypeShape::Str => Ok(Strategy::ReferenceCast {
            kind: RefKind::Str,
            nullable: false,
        }),
        TypeShape::Bytes => Ok(Strategy::ReferenceCast {
            kind: RefKind::Bytes,
            nullable: false,
        }),
        TypeShape::Option(inner) => match inner.as_ref() {
            TypeShape::Str => Ok(Strategy::ReferenceCast {
                kind: RefKind::Str,
                nullable: true,
            }),
            TypeShape::Bytes => Ok(Strategy::ReferenceCast {
                kind: RefKind::Bytes,
                nullable: true,
            }),
            // 2. Nullable value types whose underlying type is not an enum.
            TypeShape::Scalar(kind) => Ok(Strategy::NullableValue(*kind)),
            // 3b. Nullable enums.
            TypeShape::Named(name) if table.enum_info(name).is_some() => {
                Ok(Strategy::NullableEnum {
                    enum_name: name.clone(),
                })
            }
            _ => Err(unsupported()),
        },
        // 3a. Plain enums.
        TypeShape::Named(name) if table.enum_info(name).is_some() => Ok(Strategy::Enum {
            enum_name: name.clone(),
        }),
        // 4. Plain value types.
        TypeShape::Scalar(kind) => Ok(Strategy::PrimitiveConvert(*kind)),
        TypeShape::Named(_) | TypeShape::Unsupported(_) => Err(unsupported()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::settable_properties;
    use crate::scan::scan_file;

    fn classify_fields(source: &str, type_name: &str) -> Vec<Result<Strategy, GenError>> {
        let mut table = TypeTable::new();
        scan_file(&mut table, &syn::parse_file(source).unwrap()).unwrap();
        settable_properties(&table, type_name)
            .unwrap()
            .iter()
            .map(|p| classify(p, &table))
            .collect()
    }

    #[test]
    fn decision_table() {
        let strategies = classify_fields(
            r#"
            pub enum Level { Low, High }
            pub struct T {
                pub a: Option<String>,
                pub b: String,
                pub c: Option<Vec<u8>>,
                pub d: Option<i32>,
                pub e: Level,
                pub f: Option<Level>,
                pub g: i64,
                pub h: bool,
            }
            "#,
            "T",
        );
        let tags: Vec<String> = strategies
            .into_iter()
            .map(|s| s.unwrap().to_string())
            .collect();
        assert_eq!(
            tags,
            vec![
                "ReferenceCast",
                "ReferenceCast",
                "ReferenceCast",
                "NullableValue",
                "Enum",
                "NullableEnum",
                "PrimitiveConvert",
                "PrimitiveConvert",
            ]
        );
    }

    #[test]
    fn exactly_one_strategy_per_descriptor() {
        let strategies = classify_fields(
            r#"
            pub struct T { pub a: Option<i16>, pub b: f32, pub c: u64 }
            "#,
            "T",
        );
        assert_eq!(
            strategies.into_iter().collect::<Result<Vec<_>, _>>().unwrap(),
            vec![
                Strategy::NullableValue(ScalarKind::I16),
                Strategy::PrimitiveConvert(ScalarKind::F32),
                Strategy::PrimitiveConvert(ScalarKind::U64),
            ]
        );
    }

    #[test]
    fn unknown_named_type_is_unsupported() {
        let strategies = classify_fields("pub struct T { pub x: Mystery }", "T");
        assert!(matches!(
            strategies[0],
            Err(GenError::UnsupportedProperty { ref ty, ref property, .. })
                if ty == "T" && property == "x"
        ));
    }

    #[test]
    fn nested_option_is_unsupported() {
        let strategies = classify_fields("pub struct T { pub x: Option<Option<i32>> }", "T");
        assert!(matches!(
            strategies[0],
            Err(GenError::UnsupportedProperty { .. })
        ));
    }
}
