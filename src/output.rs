//! Registration/output: writes generated units under deterministic names.
//!
//! The artifact name is derived from the candidate type's simple name alone,
//! so regeneration over the same inputs is byte-identical and two
//! differently-named candidates can never collide.

use std::fs;
use std::path::{Path, PathBuf};

use crate::emit::GeneratedUnit;
use crate::errors::GenError;

/// Deterministic artifact name for a candidate type.
pub fn generated_file_name(type_name: &str) -> String {
    format!("{type_name}RowMapper.g.rs")
}

/// Writes generated units into an output directory.
#[derive(Debug)]
pub struct OutputWriter {
    out_dir: PathBuf,
}

impl OutputWriter {
    pub fn new(out_dir: impl AsRef<Path>) -> Self {
        Self {
            out_dir: out_dir.as_ref().to_path_buf(),
        }
    }

    /// Writes every unit, returning the artifact paths in unit order.
    pub fn write_units(&self, units: &[GeneratedUnit]) -> Result<Vec<PathBuf>, GenError> {
        fs::create_dir_all(&self.out_dir)?;
        let mut paths = Vec::with_capacity(units.len());
        for unit in units {
            let path = self.out_dir.join(generated_file_name(&unit.type_name));
            fs::write(&path, &unit.source)?;
            tracing::info!(artifact = %path.display(), ty = unit.type_name.as_str(), "wrote mapper unit");
            paths.push(path);
        }
        Ok(paths)
    }
}
