//! Execute setlang scripts against JSON input

use std::fs;

use super::CliError;
use crate::{Engine, Program, document, parse_script};

/// Options for the run command
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Inline script text
    pub script: Option<String>,
    /// Path of a script file, used when no inline script is given
    pub script_file: Option<String>,
    /// JSON input string
    pub input: Option<String>,
    /// Pretty-print the output
    pub pretty: bool,
    /// Only validate syntax, don't execute
    pub syntax_only: bool,
}

/// Result of a run operation
#[derive(Debug)]
pub enum RunResult {
    /// Syntax validation passed; the parsed programs in order
    SyntaxValid(Vec<Program>),
    /// Script executed successfully with JSON output
    Success(String),
}

fn load_script(options: &RunOptions) -> Result<String, CliError> {
    match (&options.script, &options.script_file) {
        (Some(script), _) => Ok(script.clone()),
        (None, Some(path)) => Ok(fs::read_to_string(path)?),
        (None, None) => Err(CliError::NoScript),
    }
}

/// Execute a setlang run operation
pub fn execute_run(options: &RunOptions) -> Result<RunResult, CliError> {
    let script = load_script(options)?;
    let programs = parse_script(&script)?;

    if options.syntax_only {
        return Ok(RunResult::SyntaxValid(programs));
    }

    let json_str = options.input.as_ref().ok_or(CliError::NoInput)?;
    let output = transform_json(&programs, json_str, options.pretty)?;
    Ok(RunResult::Success(output))
}

/// Applies `programs` to a JSON string and renders the result
pub(super) fn transform_json(
    programs: &[Program],
    json_str: &str,
    pretty: bool,
) -> Result<String, CliError> {
    let input = document::from_slice(json_str.as_bytes())?;
    let output = Engine::new().apply_all(programs, input)?;

    let json = serde_json::Value::from(output);
    let text = if pretty {
        serde_json::to_string_pretty(&json)?
    } else {
        serde_json::to_string(&json)?
    };
    Ok(text)
}
