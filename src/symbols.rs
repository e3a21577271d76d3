//! Symbol table for mapper generation.
//!
//! The host parser (`syn`) supplies syntax trees; this module is the symbol
//! boundary the rest of the pipeline works against. It records every struct
//! and enum declaration seen during scanning, the marker configuration of
//! candidate types, and the parsed shape of every field type. Entries are
//! immutable once the scan completes.

use std::collections::{BTreeMap, BTreeSet};

/// Marker substring matched against attribute path text during the cheap
/// syntax-only discovery pass.
pub const MARKER_SUBSTRING: &str = "generate_row_mapper";

/// Exact final path segment an attribute must carry to survive re-validation.
pub const MARKER_NAME: &str = "generate_row_mapper";

/// Field-level attribute naming the embedded base record of a type.
pub const BASE_FIELD_ATTR: &str = "row_mapper_base";

/// Scalar field types with a checked-conversion path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
}

impl ScalarKind {
    /// Recognizes a scalar type by its path ident.
    pub fn from_ident(name: &str) -> Option<Self> {
        match name {
            "bool" => Some(ScalarKind::Bool),
            "i8" => Some(ScalarKind::I8),
            "i16" => Some(ScalarKind::I16),
            "i32" => Some(ScalarKind::I32),
            "i64" => Some(ScalarKind::I64),
            "u8" => Some(ScalarKind::U8),
            "u16" => Some(ScalarKind::U16),
            "u32" => Some(ScalarKind::U32),
            "u64" => Some(ScalarKind::U64),
            "f32" => Some(ScalarKind::F32),
            "f64" => Some(ScalarKind::F64),
            _ => None,
        }
    }

    /// The Rust type name, as written in emitted code.
    pub fn rust_name(&self) -> &'static str {
        match self {
            ScalarKind::Bool => "bool",
            ScalarKind::I8 => "i8",
            ScalarKind::I16 => "i16",
            ScalarKind::I32 => "i32",
            ScalarKind::I64 => "i64",
            ScalarKind::U8 => "u8",
            ScalarKind::U16 => "u16",
            ScalarKind::U32 => "u32",
            ScalarKind::U64 => "u64",
            ScalarKind::F32 => "f32",
            ScalarKind::F64 => "f64",
        }
    }

    /// The `rowmap_runtime::Value` variant carrying this scalar exactly.
    pub fn value_variant(&self) -> &'static str {
        match self {
            ScalarKind::Bool => "Bool",
            ScalarKind::I8 => "I8",
            ScalarKind::I16 => "I16",
            ScalarKind::I32 => "I32",
            ScalarKind::I64 => "I64",
            ScalarKind::U8 => "U8",
            ScalarKind::U16 => "U16",
            ScalarKind::U32 => "U32",
            ScalarKind::U64 => "U64",
            ScalarKind::F32 => "F32",
            ScalarKind::F64 => "F64",
        }
    }
}

/// The parsed shape of one field type.
///
/// `Named` leaves stay unresolved until classification, when the completed
/// table can say whether the name is a known enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeShape {
    /// `String` — reference-like, owned text.
    Str,
    /// `Vec<u8>` — reference-like, owned bytes.
    Bytes,
    /// A plain scalar such as `i32` or `bool`.
    Scalar(ScalarKind),
    /// A named type to be resolved against the table (enums, base records).
    Named(String),
    /// `Option<inner>`.
    Option(Box<TypeShape>),
    /// Anything else; carries the type text for diagnostics.
    Unsupported(String),
}

/// Parses a `syn` type into its [`TypeShape`].
pub fn parse_type_shape(ty: &syn::Type) -> TypeShape {
    let unsupported = || TypeShape::Unsupported(type_text(ty));
    let syn::Type::Path(type_path) = ty else {
        return unsupported();
    };
    let Some(segment) = type_path.path.segments.last() else {
        return unsupported();
    };
    let ident = segment.ident.to_string();

    if let Some(kind) = ScalarKind::from_ident(&ident) {
        return TypeShape::Scalar(kind);
    }
    match ident.as_str() {
        "String" => TypeShape::Str,
        "Option" => match single_type_argument(segment) {
            Some(inner) => TypeShape::Option(Box::new(parse_type_shape(inner))),
            None => unsupported(),
        },
        "Vec" => match single_type_argument(segment) {
            Some(syn::Type::Path(p)) if p.path.is_ident("u8") => TypeShape::Bytes,
            _ => unsupported(),
        },
        _ if segment.arguments.is_none() => TypeShape::Named(ident),
        _ => unsupported(),
    }
}

fn single_type_argument(segment: &syn::PathSegment) -> Option<&syn::Type> {
    let syn::PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    if args.args.len() != 1 {
        return None;
    }
    match args.args.first() {
        Some(syn::GenericArgument::Type(ty)) => Some(ty),
        _ => None,
    }
}

/// Renders a type as display text for diagnostics.
pub fn type_text(ty: &syn::Type) -> String {
    quote::quote!(#ty).to_string().replace(' ', "")
}

/// Marker configuration carried by a candidate type.
///
/// All fields are optional on the attribute; the defaults here apply when a
/// field is absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapperConfig {
    /// Visibility of generated members.
    pub access: String,
    /// Module path of the target type, used for the generated `use`.
    pub namespace: String,
    /// Identifier of the generated bulk-mapper entry point.
    pub method_name: String,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            access: "pub".to_string(),
            namespace: "crate".to_string(),
            method_name: "from_rows".to_string(),
        }
    }
}

/// One field of a recorded struct.
#[derive(Debug, Clone)]
pub struct FieldInfo {
    pub name: String,
    /// Whether the field has an unrestricted `pub` setter.
    pub is_public: bool,
    /// Whether the field carries the base-embedding attribute.
    pub is_base: bool,
    pub shape: TypeShape,
    pub type_text: String,
}

/// One struct declaration recorded during the scan.
#[derive(Debug, Clone)]
pub struct StructInfo {
    pub name: String,
    /// Fields in declaration order.
    pub fields: Vec<FieldInfo>,
    /// Whether the declaration derives `Default`.
    pub derives_default: bool,
    /// Marker configuration, present only on validated candidates.
    pub config: Option<MapperConfig>,
}

/// One enum variant with its resolved discriminant.
#[derive(Debug, Clone)]
pub struct EnumVariant {
    pub name: String,
    pub discriminant: i32,
}

/// One enum declaration recorded during the scan.
#[derive(Debug, Clone)]
pub struct EnumInfo {
    pub name: String,
    /// Variants in declaration order.
    pub variants: Vec<EnumVariant>,
}

/// All declarations visible to one generation pass.
#[derive(Debug, Default)]
pub struct TypeTable {
    structs: BTreeMap<String, StructInfo>,
    enums: BTreeMap<String, EnumInfo>,
    /// Types with a standalone `impl Default` (the impl may precede or follow
    /// the struct declaration, so this is kept separate from `StructInfo`).
    default_impls: BTreeSet<String>,
    /// Candidate type names in discovery order.
    candidate_order: Vec<String>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_struct(&mut self, info: StructInfo) {
        if info.config.is_some() {
            self.candidate_order.push(info.name.clone());
        }
        self.structs.insert(info.name.clone(), info);
    }

    pub fn register_enum(&mut self, info: EnumInfo) {
        self.enums.insert(info.name.clone(), info);
    }

    pub fn register_default_impl(&mut self, type_name: &str) {
        self.default_impls.insert(type_name.to_string());
    }

    pub fn struct_info(&self, name: &str) -> Option<&StructInfo> {
        self.structs.get(name)
    }

    pub fn enum_info(&self, name: &str) -> Option<&EnumInfo> {
        self.enums.get(name)
    }

    /// Whether the named type has a parameter-less constructor (`Default`).
    pub fn has_default(&self, name: &str) -> bool {
        self.default_impls.contains(name)
            || self
                .structs
                .get(name)
                .is_some_and(|info| info.derives_default)
    }

    /// Candidate types in discovery order.
    pub fn candidates(&self) -> impl Iterator<Item = &StructInfo> {
        self.candidate_order
            .iter()
            .filter_map(|name| self.structs.get(name))
    }

    pub fn candidate_count(&self) -> usize {
        self.candidate_order.len()
    }
}
