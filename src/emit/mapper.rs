//! Emission of the bulk row-to-instance mapper.
//!
//! Only emitted when the candidate has a parameter-less constructor
//! (`Default`); its absence is the only diagnostic for types that cannot be
//! bulk-mapped. The mapper drains a single logical result set: column names
//! are captured and uppercased once, each row becomes one instance dispatched
//! column-by-column through the upper-name setter, and the source is released
//! after the first exhaustion of rows.

use proc_macro2::TokenStream;
use quote::quote;

/// Renders the bulk mapper entry point.
pub(crate) fn mapper_fn(vis: &syn::Visibility, method: &syn::Ident) -> TokenStream {
    quote! {
        #[doc = " Maps every row of `rows` to a new instance, preserving row order."]
        #[doc = ""]
        #[doc = " Returns an empty vector for an empty source; the source is released"]
        #[doc = " either way. A failed data conversion propagates to the caller."]
        #vis fn #method(rows: &mut dyn RowSource) -> Result<Vec<Self>, ConversionError> {
            let mut list = Vec::new();
            if rows.advance() {
                let column_names: Vec<String> = (0..rows.field_count())
                    .map(|i| rows.field_name(i).to_ascii_uppercase())
                    .collect();
                loop {
                    let mut item = Self::default();
                    for (i, name) in column_names.iter().enumerate() {
                        item.set_property_by_upper_name(name, rows.value(i))?;
                    }
                    list.push(item);
                    if !rows.advance() {
                        break;
                    }
                }
            }
            rows.close();
            Ok(list)
        }
    }
}
