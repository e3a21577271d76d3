//! Emission of the by-name setter pair.
//!
//! The public entry point uppercases the incoming name and delegates to a
//! private sibling that performs a linear sequence of uppercased-literal
//! comparisons in resolver order. The first matching property's strategy code
//! runs and returns immediately; an unmatched name falls off the end as a
//! silent `Ok(())`.
//!
//! Null-guard placement matters for duplicate names: `Enum` and
//! `PrimitiveConvert` fragments guard `!value.is_null() && name == ...`, so a
//! null value skips the fragment entirely and keeps scanning — a subclass's
//! non-nullable redeclaration lets a null fall through to the ancestor's
//! fragment further down the chain.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::classify::{RefKind, Strategy};
use crate::errors::GenError;
use crate::resolve::PropertyDescriptor;
use crate::symbols::{ScalarKind, TypeTable};

/// Renders the `set_property_by_name` / `set_property_by_upper_name` pair.
pub(crate) fn setter_fns(
    vis: &syn::Visibility,
    entries: &[(PropertyDescriptor, Strategy)],
    table: &TypeTable,
) -> Result<TokenStream, GenError> {
    let fragments = entries
        .iter()
        .map(|(descriptor, strategy)| fragment(descriptor, strategy, table))
        .collect::<Result<Vec<_>, _>>()?;

    // A candidate with no settable properties still gets the setter pair, with
    // parameters underscored to keep the unit warning-free.
    let (name_param, value_param) = if fragments.is_empty() {
        (format_ident!("_name"), format_ident!("_value"))
    } else {
        (format_ident!("name"), format_ident!("value"))
    };

    Ok(quote! {
        #[doc = " Assigns `value` to the property named `name` (case-insensitive)."]
        #[doc = ""]
        #[doc = " An unmatched name is a silent no-op. A failed data conversion"]
        #[doc = " propagates to the caller."]
        #vis fn set_property_by_name(
            &mut self,
            name: &str,
            value: Value,
        ) -> Result<(), ConversionError> {
            self.set_property_by_upper_name(&name.to_ascii_uppercase(), value)
        }

        fn set_property_by_upper_name(
            &mut self,
            #name_param: &str,
            #value_param: Value,
        ) -> Result<(), ConversionError> {
            #(#fragments)*
            Ok(())
        }
    })
}

/// Renders one property's assignment fragment.
fn fragment(
    descriptor: &PropertyDescriptor,
    strategy: &Strategy,
    table: &TypeTable,
) -> Result<TokenStream, GenError> {
    let upper = descriptor.upper_name.as_str();
    let target = accessor(descriptor);

    let tokens = match strategy {
        Strategy::ReferenceCast { kind, nullable } => {
            let extract = match kind {
                RefKind::Str => format_ident!("into_string"),
                RefKind::Bytes => format_ident!("into_bytes"),
            };
            if *nullable {
                // Null and mismatch both become None; this path never fails.
                quote! {
                    if name == #upper {
                        #target = value.#extract();
                        return Ok(());
                    }
                }
            } else {
                quote! {
                    if name == #upper {
                        if let Some(v) = value.#extract() {
                            #target = v;
                        }
                        return Ok(());
                    }
                }
            }
        }
        Strategy::NullableValue(kind) => {
            let variant = value_variant(kind);
            // Exact-kind match only: no conversion is attempted for nullable
            // value targets, a mismatched kind leaves the field unchanged.
            quote! {
                if name == #upper {
                    if value.is_null() {
                        #target = None;
                    } else if let Value::#variant(v) = value {
                        #target = Some(v);
                    }
                    return Ok(());
                }
            }
        }
        Strategy::Enum { enum_name } => enum_fragment(descriptor, enum_name, false, table)?,
        Strategy::NullableEnum { enum_name } => enum_fragment(descriptor, enum_name, true, table)?,
        Strategy::PrimitiveConvert(kind) => {
            let variant = value_variant(kind);
            let ty = format_ident!("{}", kind.rust_name());
            quote! {
                if !value.is_null() && name == #upper {
                    #target = match &value {
                        Value::#variant(v) => *v,
                        other => other.convert::<#ty>()?,
                    };
                    return Ok(());
                }
            }
        }
    };
    Ok(tokens)
}

fn enum_fragment(
    descriptor: &PropertyDescriptor,
    enum_name: &str,
    nullable: bool,
    table: &TypeTable,
) -> Result<TokenStream, GenError> {
    let info = table.enum_info(enum_name).ok_or_else(|| GenError::EnumShape {
        ty: enum_name.to_string(),
        message: "enum disappeared between classification and emission".to_string(),
    })?;
    let upper = descriptor.upper_name.as_str();
    let target = accessor(descriptor);
    let enum_ident = format_ident!("{}", enum_name);

    let arms = info.variants.iter().map(|variant| {
        let discriminant = variant.discriminant;
        let variant_ident = format_ident!("{}", variant.name);
        quote! { #discriminant => #enum_ident::#variant_ident, }
    });
    let mapped = quote! {
        match discriminant {
            #(#arms)*
            other => {
                return Err(ConversionError::UnknownEnumVariant {
                    enum_name: #enum_name,
                    value: other,
                });
            }
        }
    };
    let assign = if nullable {
        quote! { #target = Some(#mapped); }
    } else {
        quote! { #target = #mapped; }
    };

    // Enums are pre-converted to i32: a boxed narrower integer cannot be
    // reinterpreted as the enum directly.
    Ok(quote! {
        if !value.is_null() && name == #upper {
            let discriminant = match &value {
                Value::I32(v) => *v,
                other => other.convert::<i32>()?,
            };
            #assign
            return Ok(());
        }
    })
}

/// Field access expression for a property, walking the base-embedding path.
fn accessor(descriptor: &PropertyDescriptor) -> TokenStream {
    descriptor.path.iter().fold(quote!(self), |acc, segment| {
        let ident = format_ident!("{}", segment);
        quote!(#acc.#ident)
    })
}

fn value_variant(kind: &ScalarKind) -> proc_macro2::Ident {
    format_ident!("{}", kind.value_variant())
}
