//! CLI module for the rowmap generator.
//!
//! ## Commands
//!
//! - `generate <FILES>... --out-dir <DIR>` - Scan inputs and write mapper units
//! - `list <FILES>...` - Show discovered candidates and their strategies
//! - `emit <FILES>...` - Print generated units to stdout
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Reflection-free row-to-struct mapper generator
#[derive(Parser, Debug)]
#[command(name = "rowmap")]
#[command(version = VERSION)]
#[command(about = "Generates specialized row-to-struct mapper code", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan input files and write one mapper unit per candidate type
    Generate {
        /// Source files to scan
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
        /// Output directory for generated units
        #[arg(short, long, value_name = "DIR", default_value = "generated")]
        out_dir: PathBuf,
    },

    /// List discovered candidate types and their assignment strategies
    List {
        /// Source files to scan
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },

    /// Print generated units to stdout
    Emit {
        /// Source files to scan
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(code) => process::exit(code.0),
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(err.exit_code.0);
        }
    }
}

fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Generate { files, out_dir } => commands::generate(&files, &out_dir),
        Command::List { files } => commands::list(&files),
        Command::Emit { files } => commands::emit(&files),
    }
}
