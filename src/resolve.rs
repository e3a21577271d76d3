//! Property resolver: the ordered settable-property set of a candidate type.
//!
//! Resolution walks the type's own public named fields in declaration order,
//! then recurses through the base-embedding chain, appending each ancestor's
//! properties as the recursion unwinds — most-derived first overall.
//!
//! Deduplication is deliberately NOT performed here. When a type redeclares a
//! name its ancestor also has, both descriptors appear, subclass first; the
//! emitter's first-match-wins linear scan then gives the subclass's assignment
//! precedence at runtime. That behavior is documented and tested, not a
//! defect.

use crate::errors::GenError;
use crate::symbols::{TypeShape, TypeTable};

/// One settable property of a candidate type or one of its ancestors.
#[derive(Debug, Clone)]
pub struct PropertyDescriptor {
    /// The property name, as declared.
    pub name: String,
    /// The uppercased name the generated linear scan compares against.
    pub upper_name: String,
    /// Field access path from the target instance (`["base", "code"]` for an
    /// inherited property reached through an embedded base record).
    pub path: Vec<String>,
    /// Display text of the declared type.
    pub type_text: String,
    pub shape: TypeShape,
    /// The type that declares this property.
    pub declared_on: String,
}

impl PropertyDescriptor {
    /// Whether the declared type admits null (an `Option`).
    pub fn is_nullable(&self) -> bool {
        matches!(self.shape, TypeShape::Option(_))
    }

    /// Whether the underlying type is reference-like (owned text or bytes).
    pub fn is_reference(&self) -> bool {
        match &self.shape {
            TypeShape::Str | TypeShape::Bytes => true,
            TypeShape::Option(inner) => matches!(**inner, TypeShape::Str | TypeShape::Bytes),
            _ => false,
        }
    }
}

/// Resolves the ordered settable-property set of `type_name`.
///
/// Only `pub` fields participate (a restricted setter is exclusion, not an
/// error). An unknown or cyclic base chain aborts with a diagnostic.
pub fn settable_properties(
    table: &TypeTable,
    type_name: &str,
) -> Result<Vec<PropertyDescriptor>, GenError> {
    let mut properties = Vec::new();
    let mut visiting = Vec::new();
    collect(table, type_name, &[], &mut visiting, &mut properties)?;
    Ok(properties)
}

fn collect(
    table: &TypeTable,
    type_name: &str,
    prefix: &[String],
    visiting: &mut Vec<String>,
    out: &mut Vec<PropertyDescriptor>,
) -> Result<(), GenError> {
    if visiting.iter().any(|seen| seen == type_name) {
        return Err(GenError::BaseCycle {
            ty: type_name.to_string(),
        });
    }
    let Some(info) = table.struct_info(type_name) else {
        return Err(GenError::UnknownBase {
            ty: visiting.last().cloned().unwrap_or_default(),
            base: type_name.to_string(),
        });
    };
    visiting.push(type_name.to_string());

    let mut base: Option<(String, String)> = None;
    for field in &info.fields {
        if field.is_base {
            let TypeShape::Named(base_name) = &field.shape else {
                return Err(GenError::Marker {
                    ty: info.name.clone(),
                    message: format!(
                        "base field `{}` must have a plain struct type, found `{}`",
                        field.name, field.type_text
                    ),
                });
            };
            if !field.is_public {
                return Err(GenError::Marker {
                    ty: info.name.clone(),
                    message: format!("base field `{}` must be public", field.name),
                });
            }
            if base.is_some() {
                return Err(GenError::Marker {
                    ty: info.name.clone(),
                    message: "a type may embed at most one base record".to_string(),
                });
            }
            base = Some((field.name.clone(), base_name.clone()));
            continue;
        }
        if !field.is_public {
            continue;
        }
        let mut path = prefix.to_vec();
        path.push(field.name.clone());
        out.push(PropertyDescriptor {
            name: field.name.clone(),
            upper_name: field.name.to_ascii_uppercase(),
            path,
            type_text: field.type_text.clone(),
            shape: field.shape.clone(),
            declared_on: info.name.clone(),
        });
    }

    if let Some((field_name, base_name)) = base {
        let mut base_prefix = prefix.to_vec();
        base_prefix.push(field_name);
        collect(table, &base_name, &base_prefix, visiting, out)?;
    }
    visiting.pop();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::scan_file;

    fn resolve(source: &str, type_name: &str) -> Result<Vec<PropertyDescriptor>, GenError> {
        let mut table = TypeTable::new();
        scan_file(&mut table, &syn::parse_file(source).unwrap()).unwrap();
        settable_properties(&table, type_name)
    }

    #[test]
    fn own_properties_in_declaration_order() {
        let props = resolve(
            r#"
            pub struct T { pub b: i32, pub a: String, pub c: Option<i64> }
            "#,
            "T",
        )
        .unwrap();
        let names: Vec<_> = props.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn restricted_fields_are_excluded() {
        let props = resolve(
            r#"
            pub struct T {
                pub open: i32,
                hidden: i32,
                pub(crate) limited: i32,
            }
            "#,
            "T",
        )
        .unwrap();
        let names: Vec<_> = props.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["open"]);
    }

    #[test]
    fn ancestors_append_after_own_properties() {
        let props = resolve(
            r#"
            pub struct Child {
                pub own: i32,
                #[row_mapper_base]
                pub parent: Parent,
            }
            pub struct Parent {
                pub middle: String,
                #[row_mapper_base]
                pub grand: Grand,
            }
            pub struct Grand { pub oldest: i64 }
            "#,
            "Child",
        )
        .unwrap();
        let names: Vec<_> = props.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["own", "middle", "oldest"]);
        assert_eq!(props[1].path, vec!["parent", "middle"]);
        assert_eq!(props[2].path, vec!["parent", "grand", "oldest"]);
        assert_eq!(props[2].declared_on, "Grand");
    }

    #[test]
    fn redeclared_names_keep_both_descriptors_subclass_first() {
        let props = resolve(
            r#"
            pub struct Child {
                pub code: i32,
                #[row_mapper_base]
                pub parent: Parent,
            }
            pub struct Parent { pub code: Option<String> }
            "#,
            "Child",
        )
        .unwrap();
        let names: Vec<_> = props.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["code", "code"]);
        assert_eq!(props[0].declared_on, "Child");
        assert_eq!(props[1].declared_on, "Parent");
        assert_eq!(props[1].path, vec!["parent", "code"]);
    }

    #[test]
    fn unknown_base_is_a_diagnostic() {
        let err = resolve(
            r#"
            pub struct Child {
                #[row_mapper_base]
                pub parent: Missing,
            }
            "#,
            "Child",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            GenError::UnknownBase { ty, base } if ty == "Child" && base == "Missing"
        ));
    }

    #[test]
    fn cyclic_base_chain_is_a_diagnostic() {
        let err = resolve(
            r#"
            pub struct A {
                #[row_mapper_base]
                pub b: B,
            }
            pub struct B {
                #[row_mapper_base]
                pub a: A,
            }
            "#,
            "A",
        )
        .unwrap_err();
        assert!(matches!(err, GenError::BaseCycle { .. }));
    }

    #[test]
    fn upper_names_are_ascii_uppercased() {
        let props = resolve("pub struct T { pub string1: Option<String> }", "T").unwrap();
        assert_eq!(props[0].upper_name, "STRING1");
    }
}
