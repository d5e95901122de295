//! CLI support for setlang
//!
//! Provides programmatic access to the `setl` commands so they can be
//! embedded and tested without spawning the binary.

mod demo;
mod docs;
mod run;

pub use demo::{SAMPLE_DOCUMENT, SAMPLE_SCRIPT, execute_demo};
pub use docs::get_transformers_overview;
pub use run::{RunOptions, RunResult, execute_run};

use std::io;

/// Errors that can occur during CLI operations
#[derive(Debug)]
pub enum CliError {
    /// Syntax error in the script
    Parse(crate::ParseError),
    /// Execution error
    Engine(crate::EngineError),
    /// JSON parsing or encoding error
    Json(serde_json::Error),
    /// IO error
    Io(io::Error),
    /// No document provided
    NoInput,
    /// No script provided
    NoScript,
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Parse(e) => write!(f, "Syntax error: {}", e),
            CliError::Engine(e) => write!(f, "Execution error: {}", e),
            CliError::Json(e) => write!(f, "Invalid JSON: {}", e),
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::NoInput => write!(f, "No input provided. Use --input or pipe JSON to stdin."),
            CliError::NoScript => write!(f, "No script provided. Pass it inline or use --file."),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Parse(e) => Some(e),
            CliError::Engine(e) => Some(e),
            CliError::Json(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<crate::ParseError> for CliError {
    fn from(e: crate::ParseError) -> Self {
        CliError::Parse(e)
    }
}

impl From<crate::EngineError> for CliError {
    fn from(e: crate::EngineError) -> Self {
        CliError::Engine(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}
