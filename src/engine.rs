use std::fmt;

use log::{debug, trace};

use crate::{
    ast::{PLACEHOLDER, Program},
    document::{self, PathError},
    transformer::{Registry, Results, TransformError, Transformer},
    value::Value,
};

/// Errors that can occur while executing programs.
#[derive(Debug)]
pub enum EngineError {
    /// No transformer registered under this name
    UnknownTransformer(String),

    /// A referenced field does not exist in the document
    MissingField(String),

    /// The array preceding `#` is missing or not an array
    NotAnArray(String),

    /// The transformer returned a different number of results than there are variables
    ResultCount {
        transformer: String,
        expected: usize,
        got: usize,
    },

    /// Iteration mode was used with more than one target variable
    IterationTarget(String),

    /// The transformer body failed
    Transform(TransformError),

    /// A result could not be written back
    Path(PathError),

    /// The document is not valid JSON
    Json(serde_json::Error),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::UnknownTransformer(name) => write!(f, "Transformer '{}' not found", name),
            EngineError::MissingField(path) => write!(f, "Field '{}' not found in document", path),
            EngineError::NotAnArray(path) => write!(f, "Field '{}' is not an array", path),
            EngineError::ResultCount {
                transformer,
                expected,
                got,
            } => write!(
                f,
                "Transformer '{}' returned {} value{} for {} variable{}",
                transformer,
                got,
                if *got == 1 { "" } else { "s" },
                expected,
                if *expected == 1 { "" } else { "s" }
            ),
            EngineError::IterationTarget(program) => write!(
                f,
                "Iteration requires exactly one target variable: {}",
                program
            ),
            EngineError::Transform(e) => write!(f, "{}", e),
            EngineError::Path(e) => write!(f, "{}", e),
            EngineError::Json(e) => write!(f, "Invalid JSON document: {}", e),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Transform(e) => Some(e),
            EngineError::Path(e) => Some(e),
            EngineError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TransformError> for EngineError {
    fn from(e: TransformError) -> Self {
        EngineError::Transform(e)
    }
}

impl From<PathError> for EngineError {
    fn from(e: PathError) -> Self {
        EngineError::Path(e)
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(e: serde_json::Error) -> Self {
        EngineError::Json(e)
    }
}

/// Executes programs against documents.
///
/// The engine keeps no copy of the document: each program takes the document
/// by value and hands the updated one to the next.
#[derive(Default)]
pub struct Engine {
    registry: Registry,
}

impl Engine {
    /// Creates an engine with the built-in transformers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine over a custom registry.
    pub fn with_registry(registry: Registry) -> Self {
        Engine { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Runs one program against a JSON document.
    ///
    /// Temporary fields are left in place; only [`Engine::execute_all`]
    /// removes them.
    pub fn execute(&self, program: &Program, document: &[u8]) -> Result<Vec<u8>, EngineError> {
        let document = document::from_slice(document)?;
        let document = self.apply(program, document)?;
        Ok(document::to_vec(document)?)
    }

    /// Runs a batch of programs against a JSON document.
    ///
    /// # Examples
    ///
    /// ```
    /// use setlang::{Engine, parse_script};
    ///
    /// let programs = parse_script("SET name = uppercase(name)").unwrap();
    /// let output = Engine::new()
    ///     .execute_all(&programs, br#"{"name": "john"}"#)
    ///     .unwrap();
    /// assert_eq!(output, br#"{"name":"JOHN"}"#);
    /// ```
    pub fn execute_all(&self, programs: &[Program], document: &[u8]) -> Result<Vec<u8>, EngineError> {
        let document = document::from_slice(document)?;
        let document = self.apply_all(programs, document)?;
        Ok(document::to_vec(document)?)
    }

    /// Runs one program, dispatching on the presence of `#` in its targets.
    pub fn apply(&self, program: &Program, document: Value) -> Result<Value, EngineError> {
        debug!("executing {}", program);

        let transformer = self
            .registry
            .create(&program.transformer)
            .ok_or_else(|| EngineError::UnknownTransformer(program.transformer.clone()))?;

        if program.is_iteration() {
            self.apply_iteration(program, transformer.as_ref(), document)
        } else {
            self.apply_direct(program, transformer.as_ref(), document)
        }
    }

    /// Runs programs in order and removes temporary fields.
    ///
    /// The first failure aborts the batch; the partially updated document is
    /// dropped with it.
    pub fn apply_all(&self, programs: &[Program], document: Value) -> Result<Value, EngineError> {
        let mut document = document;
        for program in programs {
            document = self.apply(program, document)?;
        }

        for program in programs {
            for variable in program.temporaries() {
                document = purge_temporary(document, variable);
            }
        }

        Ok(document)
    }

    fn apply_direct(
        &self,
        program: &Program,
        transformer: &dyn Transformer,
        document: Value,
    ) -> Result<Value, EngineError> {
        let args = program
            .args
            .iter()
            .map(|arg| resolve_arg(&document, arg))
            .collect::<Result<Vec<_>, _>>()?;

        let results = transformer.transform(&args, &document)?;
        check_result_count(program, &results, program.variables.len())?;

        let mut document = document;
        for (variable, value) in program.variables.iter().zip(results) {
            document = document::set(document, variable, value)?;
        }
        Ok(document)
    }

    fn apply_iteration(
        &self,
        program: &Program,
        transformer: &dyn Transformer,
        document: Value,
    ) -> Result<Value, EngineError> {
        let [variable] = program.variables.as_slice() else {
            return Err(EngineError::IterationTarget(program.to_string()));
        };

        let len = array_len(&document, variable)?;

        // The declared arguments are replaced by the per-element path
        let mut document = document;
        for i in 0..len {
            let path = variable.replacen(PLACEHOLDER, &i.to_string(), 1);
            trace!("iteration {} of {}: {}", i + 1, len, path);

            let arg = resolve_arg(&document, &path)?;
            let results = transformer.transform(&[arg], &document)?;
            check_result_count(program, &results, 1)?;

            for value in results {
                document = document::set(document, &path, value)?;
            }
        }
        Ok(document)
    }
}

/// Length of the array that precedes the first `#` in `variable`.
fn array_len(document: &Value, variable: &str) -> Result<usize, EngineError> {
    let placeholder = variable.find(PLACEHOLDER).unwrap_or(variable.len());
    let prefix = variable[..placeholder].trim_end_matches('.');

    match document::get(document, prefix) {
        Some(Value::Array(items)) => Ok(items.len()),
        _ => Err(EngineError::NotAnArray(prefix.to_string())),
    }
}

/// Quoted arguments are literals, everything else is a field path.
fn resolve_arg(document: &Value, arg: &str) -> Result<Value, EngineError> {
    if let Some(literal) = arg
        .strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
    {
        return Ok(Value::String(literal.to_string()));
    }

    let value = document::get(document, arg)
        .cloned()
        .ok_or_else(|| EngineError::MissingField(arg.to_string()))?;
    trace!("resolved {} = {:?}", arg, value);
    Ok(value)
}

fn check_result_count(program: &Program, results: &Results, expected: usize) -> Result<(), EngineError> {
    if results.len() != expected {
        return Err(EngineError::ResultCount {
            transformer: program.transformer.clone(),
            expected,
            got: results.len(),
        });
    }
    Ok(())
}

/// Removes a temporary variable path, once per element when it goes through `#`.
fn purge_temporary(document: Value, variable: &str) -> Value {
    if !variable.contains(PLACEHOLDER) {
        debug!("removing temporary {}", variable);
        return document::delete(document, variable);
    }

    let len = array_len(&document, variable).unwrap_or(0);
    let mut document = document;
    for i in 0..len {
        let path = variable.replacen(PLACEHOLDER, &i.to_string(), 1);
        debug!("removing temporary {}", path);
        document = document::delete(document, &path);
    }
    document
}
