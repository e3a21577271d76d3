//! Generator error types.

use thiserror::Error;

/// Failures raised anywhere in the scan, resolve, classify, or emit passes.
#[derive(Debug, Error)]
pub enum GenError {
    #[error("failed to parse {file}: {source}")]
    Parse {
        file: String,
        #[source]
        source: syn::Error,
    },

    #[error("invalid mapper marker on `{ty}`: {message}")]
    Marker { ty: String, message: String },

    #[error("`{ty}` names unknown base type `{base}`")]
    UnknownBase { ty: String, base: String },

    #[error("base-embedding cycle through `{ty}`")]
    BaseCycle { ty: String },

    #[error("`{ty}.{property}` has unsupported type `{type_text}`")]
    UnsupportedProperty {
        ty: String,
        property: String,
        type_text: String,
    },

    #[error("enum `{ty}` cannot be mapped: {message}")]
    EnumShape { ty: String, message: String },

    #[error("emitted unit for `{ty}` failed to re-parse: {source}")]
    Render {
        ty: String,
        #[source]
        source: syn::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
