//! CLI module for the Sindarin syntax toolchain.
//!
//! ## Commands
//!
//! - `lex <file>` - Dump the token stream (trivia included)
//! - `parse <file>` - Dump the syntax tree; diagnostics go to stderr
//! - `check <file>` - Strict parse; any diagnostic fails with exit code 1
//!
//! Running `sindarin <file>` with no subcommand is shorthand for `check`.
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros. Command
//! functions return `CliResult<T>` instead of calling `process::exit`; only
//! the top-level `run()` function handles errors and exits.

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

/// The Sindarin syntax toolchain
#[derive(Parser, Debug)]
#[command(name = "sindarin")]
#[command(version = VERSION)]
#[command(about = "Sindarin syntax frontend: lexer, parser, diagnostics", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// File to check (default action when no subcommand given)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Dump the token stream of a source file
    Lex {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Dump the syntax tree of a source file (error-tolerant)
    Parse {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Parse strictly: any syntax error fails
    Check {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

/// Parse arguments, dispatch, and exit with the command's status.
pub fn run() {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Command::Lex { file }) => commands::lex(&file),
        Some(Command::Parse { file }) => commands::parse(&file),
        Some(Command::Check { file }) => commands::check(&file),
        None => match cli.file {
            Some(file) => commands::check(&file),
            None => Err(CliError::failure("no input file; see `sindarin --help`")),
        },
    };

    if let Err(error) = result {
        if !error.message.is_empty() {
            eprintln!("{}", error.message);
        }
        process::exit(error.exit_code.0);
    }
}
