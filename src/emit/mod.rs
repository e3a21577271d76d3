//! Code emitter: renders one generated unit per candidate type.
//!
//! A unit is a complete compilable file containing an inherent `impl` on the
//! target type with the by-name setter pair and, when the type has a
//! parameter-less constructor, the bulk mapper. Emission builds a token stream
//! with `quote`, re-parses it with `syn`, and formats it through
//! `prettyplease`, so the output is byte-identical across regenerations of the
//! same input.

mod mapper;
mod setter;

use std::collections::BTreeSet;

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::classify::{Strategy, classify};
use crate::errors::GenError;
use crate::resolve::settable_properties;
use crate::symbols::{MapperConfig, StructInfo, TypeTable};
use crate::version::ROWMAP_VERSION;

/// The textual output for one candidate type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    /// Simple name of the candidate type.
    pub type_name: String,
    /// Complete source text of the unit.
    pub source: String,
}

/// Emits the generated unit for one candidate type.
#[tracing::instrument(skip_all, fields(ty = info.name.as_str()))]
pub fn emit_unit(table: &TypeTable, info: &StructInfo) -> Result<GeneratedUnit, GenError> {
    let config = info.config.clone().unwrap_or_default();
    let marker_err = |message: String| GenError::Marker {
        ty: info.name.clone(),
        message,
    };

    let vis: syn::Visibility = syn::parse_str(&config.access)
        .map_err(|_| marker_err(format!("invalid access modifier `{}`", config.access)))?;
    let method: syn::Ident = syn::parse_str(&config.method_name)
        .map_err(|_| marker_err(format!("invalid method name `{}`", config.method_name)))?;

    let properties = settable_properties(table, &info.name)?;
    let entries = properties
        .into_iter()
        .map(|descriptor| {
            let strategy = classify(&descriptor, table)?;
            Ok((descriptor, strategy))
        })
        .collect::<Result<Vec<_>, GenError>>()?;

    let has_mapper = table.has_default(&info.name);
    let use_items = use_items(&config, info, &entries, has_mapper)?;
    let setter = setter::setter_fns(&vis, &entries, table)?;
    let mapper = has_mapper.then(|| mapper::mapper_fn(&vis, &method));
    if mapper.is_none() {
        tracing::debug!(
            ty = info.name.as_str(),
            "no parameter-less constructor; bulk mapper not generated"
        );
    }

    let type_ident = format_ident!("{}", info.name);
    let tokens = quote! {
        #(#use_items)*

        impl #type_ident {
            #setter
            #mapper
        }
    };

    let file = syn::parse2::<syn::File>(tokens).map_err(|source| GenError::Render {
        ty: info.name.clone(),
        source,
    })?;
    let source = format!(
        "// @generated by rowmap {version}; do not edit.\n// Mapper unit for `{namespace}::{name}`.\n\n{body}",
        version = ROWMAP_VERSION,
        namespace = config.namespace,
        name = info.name,
        body = prettyplease::unparse(&file),
    );

    Ok(GeneratedUnit {
        type_name: info.name.clone(),
        source,
    })
}

/// Builds the unit's `use` items: runtime vocabulary, the target type, and
/// every enum its properties reference, all resolved through the configured
/// namespace.
fn use_items(
    config: &MapperConfig,
    info: &StructInfo,
    entries: &[(crate::resolve::PropertyDescriptor, Strategy)],
    has_mapper: bool,
) -> Result<Vec<TokenStream>, GenError> {
    let parse_path = |path: &str| -> Result<syn::Path, GenError> {
        syn::parse_str(path).map_err(|_| GenError::Marker {
            ty: info.name.clone(),
            message: format!("invalid namespace path `{}`", config.namespace),
        })
    };

    let mut items = Vec::new();
    // RowSource only appears in the mapper signature; importing it without one
    // would leave an unused-import warning in the host build.
    if has_mapper {
        items.push(quote!(use rowmap_runtime::{ConversionError, RowSource, Value};));
    } else {
        items.push(quote!(use rowmap_runtime::{ConversionError, Value};));
    }

    let target = parse_path(&format!("{}::{}", config.namespace, info.name))?;
    items.push(quote!(use #target;));

    let mut enum_names = BTreeSet::new();
    for (_, strategy) in entries {
        match strategy {
            Strategy::Enum { enum_name } | Strategy::NullableEnum { enum_name } => {
                enum_names.insert(enum_name.clone());
            }
            _ => {}
        }
    }
    for enum_name in enum_names {
        let path = parse_path(&format!("{}::{}", config.namespace, enum_name))?;
        items.push(quote!(use #path;));
    }
    Ok(items)
}
