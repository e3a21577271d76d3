//! Generation facade: source files in, generated units out.
//!
//! Each candidate's resolve → classify → emit pipeline reads only that type's
//! own symbol data, so units are independent of each other; the only shared
//! state is the table accumulated during scanning.

use crate::emit::{GeneratedUnit, emit_unit};
use crate::errors::GenError;
use crate::scan::scan_file;
use crate::symbols::TypeTable;

/// Drives the scan and generation passes over a set of input declarations.
#[derive(Debug, Default)]
pub struct Generator {
    table: TypeTable,
}

impl Generator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses one source file and scans its declarations into the table.
    #[tracing::instrument(skip_all, fields(file = name))]
    pub fn add_source(&mut self, name: &str, source: &str) -> Result<(), GenError> {
        let file = syn::parse_file(source).map_err(|source| GenError::Parse {
            file: name.to_string(),
            source,
        })?;
        scan_file(&mut self.table, &file)
    }

    /// The accumulated symbol table.
    pub fn table(&self) -> &TypeTable {
        &self.table
    }

    /// Emits one unit per candidate type, in discovery order.
    #[tracing::instrument(skip_all, fields(candidates = self.table.candidate_count()))]
    pub fn generate(&self) -> Result<Vec<GeneratedUnit>, GenError> {
        self.table
            .candidates()
            .map(|info| emit_unit(&self.table, info))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_failures_name_the_file() {
        let mut generator = Generator::new();
        let err = generator.add_source("broken.rs", "struct {").unwrap_err();
        assert!(matches!(err, GenError::Parse { file, .. } if file == "broken.rs"));
    }

    #[test]
    fn zero_candidates_generates_nothing() {
        let mut generator = Generator::new();
        generator
            .add_source("lib.rs", "pub struct Plain { pub id: i32 }")
            .unwrap();
        assert!(generator.generate().unwrap().is_empty());
    }

    #[test]
    fn candidates_can_span_files() {
        let mut generator = Generator::new();
        generator
            .add_source(
                "child.rs",
                r#"
                #[generate_row_mapper]
                #[derive(Default)]
                pub struct Child {
                    pub own: i32,
                    #[row_mapper_base]
                    pub parent: Parent,
                }
                "#,
            )
            .unwrap();
        generator
            .add_source("parent.rs", "pub struct Parent { pub inherited: i64 }")
            .unwrap();
        let units = generator.generate().unwrap();
        assert_eq!(units.len(), 1);
        assert!(units[0].source.contains("INHERITED"));
    }
}
