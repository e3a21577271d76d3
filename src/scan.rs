//! Type scanner: discovers candidate types in parsed declarations.
//!
//! The scan is a cheap syntax-only pass. A struct becomes a candidate when one
//! of its attributes contains the marker substring in its path text; the hit
//! is then re-validated against the exact marker path before it commits to
//! generation, so an unrelated attribute that merely shares a name fragment is
//! dropped instead of silently generating for the wrong type. Zero candidates
//! is not an error.
//!
//! Besides candidates, the scanner records every struct and enum declaration
//! and every `impl Default` — base-chain resolution, enum classification, and
//! bulk-mapper eligibility all read from this record.

use syn::{Expr, Fields, Item, Lit, UnOp};

use crate::errors::GenError;
use crate::symbols::{
    BASE_FIELD_ATTR, EnumInfo, EnumVariant, FieldInfo, MARKER_NAME, MARKER_SUBSTRING, MapperConfig,
    StructInfo, TypeTable, parse_type_shape, type_text,
};

/// Scans one parsed file into the table, including nested inline modules.
pub fn scan_file(table: &mut TypeTable, file: &syn::File) -> Result<(), GenError> {
    scan_items(table, &file.items)
}

fn scan_items(table: &mut TypeTable, items: &[Item]) -> Result<(), GenError> {
    for item in items {
        match item {
            Item::Struct(item) => scan_struct(table, item)?,
            Item::Enum(item) => scan_enum(table, item)?,
            Item::Impl(item) => scan_impl(table, item),
            Item::Mod(item) => {
                if let Some((_, items)) = &item.content {
                    scan_items(table, items)?;
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn scan_struct(table: &mut TypeTable, item: &syn::ItemStruct) -> Result<(), GenError> {
    let name = item.ident.to_string();
    let config = marker_config(&name, &item.attrs)?;

    let fields = match &item.fields {
        Fields::Named(named) => named
            .named
            .iter()
            .map(|field| {
                let field_name = field
                    .ident
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default();
                FieldInfo {
                    name: field_name,
                    is_public: matches!(field.vis, syn::Visibility::Public(_)),
                    is_base: field
                        .attrs
                        .iter()
                        .any(|attr| attr.path().is_ident(BASE_FIELD_ATTR)),
                    shape: parse_type_shape(&field.ty),
                    type_text: type_text(&field.ty),
                }
            })
            .collect(),
        Fields::Unit => Vec::new(),
        Fields::Unnamed(_) => {
            if config.is_some() {
                return Err(GenError::Marker {
                    ty: name,
                    message: "only structs with named fields can carry the mapper marker"
                        .to_string(),
                });
            }
            Vec::new()
        }
    };

    table.register_struct(StructInfo {
        name,
        fields,
        derives_default: derives_default(&item.attrs),
        config,
    });
    Ok(())
}

/// Finds and parses the generation marker, if present and valid.
///
/// Matching is two-phase: substring containment on the attribute path text
/// first, then exact-path validation. A substring hit that fails validation is
/// logged and ignored.
fn marker_config(
    type_name: &str,
    attrs: &[syn::Attribute],
) -> Result<Option<MapperConfig>, GenError> {
    for attr in attrs {
        let path_text = attr
            .path()
            .segments
            .iter()
            .map(|segment| segment.ident.to_string())
            .collect::<Vec<_>>()
            .join("::");
        if !path_text.contains(MARKER_SUBSTRING) {
            continue;
        }
        let last_segment = attr
            .path()
            .segments
            .last()
            .map(|segment| segment.ident.to_string())
            .unwrap_or_default();
        if last_segment != MARKER_NAME {
            tracing::debug!(
                ty = type_name,
                attribute = path_text,
                "marker substring hit failed exact-path validation; skipping"
            );
            continue;
        }
        return parse_marker_options(type_name, attr).map(Some);
    }
    Ok(None)
}

fn parse_marker_options(type_name: &str, attr: &syn::Attribute) -> Result<MapperConfig, GenError> {
    let mut config = MapperConfig::default();
    if matches!(attr.meta, syn::Meta::Path(_)) {
        return Ok(config);
    }
    attr.parse_nested_meta(|meta| {
        let value = |meta: &syn::meta::ParseNestedMeta| -> syn::Result<String> {
            Ok(meta.value()?.parse::<syn::LitStr>()?.value())
        };
        if meta.path.is_ident("access") {
            config.access = value(&meta)?;
        } else if meta.path.is_ident("namespace") {
            config.namespace = value(&meta)?;
        } else if meta.path.is_ident("method_name") {
            config.method_name = value(&meta)?;
        } else {
            return Err(meta.error("unrecognized mapper marker option"));
        }
        Ok(())
    })
    .map_err(|err| GenError::Marker {
        ty: type_name.to_string(),
        message: err.to_string(),
    })?;
    Ok(config)
}

fn derives_default(attrs: &[syn::Attribute]) -> bool {
    attrs.iter().any(|attr| {
        if !attr.path().is_ident("derive") {
            return false;
        }
        let mut found = false;
        // Malformed derive lists are the host compiler's problem, not ours.
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("Default") {
                found = true;
            }
            Ok(())
        });
        found
    })
}

fn scan_enum(table: &mut TypeTable, item: &syn::ItemEnum) -> Result<(), GenError> {
    let name = item.ident.to_string();
    let mut variants = Vec::with_capacity(item.variants.len());
    let mut next_discriminant = 0i32;
    for variant in &item.variants {
        if !matches!(variant.fields, Fields::Unit) {
            // Data-carrying enums have no integer representation to map onto;
            // they only become an error if a property actually uses them.
            return Ok(());
        }
        let discriminant = match &variant.discriminant {
            Some((_, expr)) => discriminant_value(&name, expr)?,
            None => next_discriminant,
        };
        next_discriminant = discriminant.wrapping_add(1);
        variants.push(EnumVariant {
            name: variant.ident.to_string(),
            discriminant,
        });
    }
    table.register_enum(EnumInfo { name, variants });
    Ok(())
}

fn discriminant_value(enum_name: &str, expr: &Expr) -> Result<i32, GenError> {
    let parse_int = |lit: &syn::LitInt| {
        lit.base10_parse::<i32>().map_err(|_| GenError::EnumShape {
            ty: enum_name.to_string(),
            message: format!("discriminant `{}` does not fit in i32", lit.token()),
        })
    };
    match expr {
        Expr::Lit(lit) => match &lit.lit {
            Lit::Int(int) => parse_int(int),
            _ => Err(GenError::EnumShape {
                ty: enum_name.to_string(),
                message: "non-integer discriminant".to_string(),
            }),
        },
        Expr::Unary(unary) if matches!(unary.op, UnOp::Neg(_)) => match unary.expr.as_ref() {
            Expr::Lit(lit) => match &lit.lit {
                Lit::Int(int) => parse_int(int).map(|v| -v),
                _ => Err(GenError::EnumShape {
                    ty: enum_name.to_string(),
                    message: "non-integer discriminant".to_string(),
                }),
            },
            _ => Err(GenError::EnumShape {
                ty: enum_name.to_string(),
                message: "unsupported discriminant expression".to_string(),
            }),
        },
        _ => Err(GenError::EnumShape {
            ty: enum_name.to_string(),
            message: "unsupported discriminant expression".to_string(),
        }),
    }
}

fn scan_impl(table: &mut TypeTable, item: &syn::ItemImpl) {
    let Some((_, trait_path, _)) = &item.trait_ else {
        return;
    };
    let is_default = trait_path
        .segments
        .last()
        .is_some_and(|segment| segment.ident == "Default");
    if !is_default {
        return;
    }
    if let syn::Type::Path(self_ty) = item.self_ty.as_ref() {
        if let Some(segment) = self_ty.path.segments.last() {
            table.register_default_impl(&segment.ident.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(source: &str) -> TypeTable {
        let mut table = TypeTable::new();
        let file = syn::parse_file(source).unwrap();
        scan_file(&mut table, &file).unwrap();
        table
    }

    #[test]
    fn finds_marked_structs() {
        let table = scan(
            r#"
            #[generate_row_mapper]
            pub struct Marked { pub id: i32 }

            pub struct Unmarked { pub id: i32 }
            "#,
        );
        let names: Vec<_> = table.candidates().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Marked"]);
        assert!(table.struct_info("Unmarked").is_some());
    }

    #[test]
    fn zero_candidates_is_not_an_error() {
        let table = scan("pub struct Plain { pub id: i32 }");
        assert_eq!(table.candidate_count(), 0);
    }

    #[test]
    fn substring_hit_without_exact_path_is_rejected() {
        let table = scan(
            r#"
            #[generate_row_mapper_v2]
            pub struct LooksClose { pub id: i32 }
            "#,
        );
        assert_eq!(table.candidate_count(), 0);
    }

    #[test]
    fn qualified_marker_path_is_accepted() {
        let table = scan(
            r#"
            #[rowmap::generate_row_mapper]
            pub struct Qualified { pub id: i32 }
            "#,
        );
        assert_eq!(table.candidate_count(), 1);
    }

    #[test]
    fn parses_marker_options() {
        let table = scan(
            r#"
            #[generate_row_mapper(access = "pub(crate)", namespace = "crate::models", method_name = "load")]
            pub struct Configured { pub id: i32 }
            "#,
        );
        let config = table
            .struct_info("Configured")
            .unwrap()
            .config
            .clone()
            .unwrap();
        assert_eq!(config.access, "pub(crate)");
        assert_eq!(config.namespace, "crate::models");
        assert_eq!(config.method_name, "load");
    }

    #[test]
    fn defaults_apply_for_bare_marker() {
        let table = scan(
            r#"
            #[generate_row_mapper]
            pub struct Bare { pub id: i32 }
            "#,
        );
        let config = table.struct_info("Bare").unwrap().config.clone().unwrap();
        assert_eq!(config, MapperConfig::default());
    }

    #[test]
    fn unknown_marker_option_is_an_error() {
        let mut table = TypeTable::new();
        let file = syn::parse_file(
            r#"
            #[generate_row_mapper(colour = "red")]
            pub struct Bad { pub id: i32 }
            "#,
        )
        .unwrap();
        let err = scan_file(&mut table, &file).unwrap_err();
        assert!(matches!(err, GenError::Marker { ty, .. } if ty == "Bad"));
    }

    #[test]
    fn scans_nested_modules() {
        let table = scan(
            r#"
            mod inner {
                #[generate_row_mapper]
                pub struct Nested { pub id: i32 }
            }
            "#,
        );
        assert_eq!(table.candidate_count(), 1);
    }

    #[test]
    fn records_enum_discriminants() {
        let table = scan(
            r#"
            pub enum Level { Zero, Low = 5, High, Negative = -2 }
            "#,
        );
        let info = table.enum_info("Level").unwrap();
        let discriminants: Vec<_> = info.variants.iter().map(|v| v.discriminant).collect();
        assert_eq!(discriminants, vec![0, 5, 6, -2]);
    }

    #[test]
    fn records_default_facts() {
        let table = scan(
            r#"
            #[derive(Debug, Default)]
            pub struct Derived { pub id: i32 }

            pub struct Explicit { pub id: i32 }
            impl Default for Explicit {
                fn default() -> Self { Self { id: 0 } }
            }

            pub struct NoDefault { pub id: i32 }
            "#,
        );
        assert!(table.has_default("Derived"));
        assert!(table.has_default("Explicit"));
        assert!(!table.has_default("NoDefault"));
    }

    #[test]
    fn marks_base_fields() {
        let table = scan(
            r#"
            #[generate_row_mapper]
            pub struct Child {
                pub own: i32,
                #[row_mapper_base]
                pub parent: Parent,
            }
            pub struct Parent { pub inherited: i32 }
            "#,
        );
        let child = table.struct_info("Child").unwrap();
        assert!(!child.fields[0].is_base);
        assert!(child.fields[1].is_base);
    }
}
