//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::classify::classify;
use crate::generator::Generator;
use crate::output::OutputWriter;
use crate::resolve::settable_properties;

use super::{CliError, CliResult, ExitCode};

/// Reads and scans every input file into a generator.
fn load(files: &[PathBuf]) -> CliResult<Generator> {
    let mut generator = Generator::new();
    for path in files {
        let source = fs::read_to_string(path)
            .map_err(|err| CliError::failure(format!("cannot read {}: {err}", path.display())))?;
        generator
            .add_source(&path.display().to_string(), &source)
            .map_err(|err| CliError::failure(err.to_string()))?;
    }
    Ok(generator)
}

/// Scan inputs and write one mapper unit per candidate type.
pub fn generate(files: &[PathBuf], out_dir: &Path) -> CliResult<ExitCode> {
    let generator = load(files)?;
    let units = generator
        .generate()
        .map_err(|err| CliError::failure(err.to_string()))?;
    if units.is_empty() {
        // Zero candidates is a valid outcome, not an error.
        tracing::warn!("no candidate types found in the given files");
        return Ok(ExitCode::SUCCESS);
    }
    let paths = OutputWriter::new(out_dir)
        .write_units(&units)
        .map_err(|err| CliError::failure(err.to_string()))?;
    for path in paths {
        println!("wrote {}", path.display());
    }
    Ok(ExitCode::SUCCESS)
}

/// Show discovered candidates with their property sets and strategies.
pub fn list(files: &[PathBuf]) -> CliResult<ExitCode> {
    let generator = load(files)?;
    let table = generator.table();
    for info in table.candidates() {
        let mapper = if table.has_default(&info.name) {
            let config = info.config.clone().unwrap_or_default();
            format!("mapper: {}", config.method_name)
        } else {
            "no parameter-less constructor; setter only".to_string()
        };
        println!("{} ({mapper})", info.name);
        let properties = settable_properties(table, &info.name)
            .map_err(|err| CliError::failure(err.to_string()))?;
        for descriptor in &properties {
            let strategy = classify(descriptor, table)
                .map_err(|err| CliError::failure(err.to_string()))?;
            println!(
                "  {}: {} -> {strategy}",
                descriptor.path.join("."),
                descriptor.type_text
            );
        }
    }
    if table.candidate_count() == 0 {
        println!("no candidate types found");
    }
    Ok(ExitCode::SUCCESS)
}

/// Print every generated unit to stdout.
pub fn emit(files: &[PathBuf]) -> CliResult<ExitCode> {
    let generator = load(files)?;
    let units = generator
        .generate()
        .map_err(|err| CliError::failure(err.to_string()))?;
    for unit in &units {
        println!("{}", unit.source);
    }
    Ok(ExitCode::SUCCESS)
}
