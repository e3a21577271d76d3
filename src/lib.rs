#![forbid(unsafe_code)]
//! Rowmap: a compile-time row-to-struct mapper generator
//!
//! Rowmap scans Rust type declarations for a generation marker and emits, per
//! marked type, a specialized mapper unit: a by-name property setter compiled
//! into a chain of direct branches, and a bulk mapper that populates instances
//! from a tabular row source. No runtime reflection is involved; every
//! assignment the generated code performs was decided here, at generation
//! time.
//!
//! ## Pipeline
//!
//! - [`scan`] discovers candidate types and records every struct/enum
//!   declaration into the [`symbols::TypeTable`].
//! - [`resolve`] produces each candidate's ordered settable-property set,
//!   walking the base-embedding chain with first-match-wins duplicate
//!   semantics.
//! - [`classify`] tags each property with one of five assignment strategies.
//! - [`emit`] renders one compilable unit per candidate via `quote` and
//!   `prettyplease`.
//! - [`output`] registers units under deterministic artifact names.
//!
//! Generated code links against the `rowmap_runtime` crate for its `Value`,
//! `RowSource`, and conversion vocabulary.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` /
//!   `map_err`. The `cli` module enforces `#![deny(clippy::unwrap_used)]`.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod classify;
pub mod cli;
pub mod emit;
pub mod errors;
pub mod generator;
pub mod output;
pub mod resolve;
pub mod scan;
pub mod symbols;
pub mod version;

pub use classify::{Strategy, classify};
pub use emit::{GeneratedUnit, emit_unit};
pub use errors::GenError;
pub use generator::Generator;
pub use output::{OutputWriter, generated_file_name};
pub use resolve::{PropertyDescriptor, settable_properties};
pub use symbols::TypeTable;
