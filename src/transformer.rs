//! Transformer capability and the name → factory registry.
//!
//! A transformer receives its resolved arguments together with read access to
//! the live document and returns an ordered list of results, one per target
//! variable of the program that invoked it.

use std::{collections::HashMap, fmt};

use crate::value::Value;

mod health;
mod text;

pub use health::Bmi;
pub use text::{Concatenate, Split, Uppercase};

/// Ordered output of one transformer invocation.
pub type Results = Vec<Value>;

/// Errors a transformer body can raise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// Wrong number of arguments
    Arity(String),

    /// Argument of the wrong type
    Type(String),
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformError::Arity(msg) => write!(f, "Arity error: {}", msg),
            TransformError::Type(msg) => write!(f, "Type error: {}", msg),
        }
    }
}

impl std::error::Error for TransformError {}

/// A named function from resolved arguments to ordered results.
pub trait Transformer {
    /// Usage line shown by `setl transformers`
    fn usage(&self) -> &'static str;

    fn transform(&self, args: &[Value], document: &Value) -> Result<Results, TransformError>;
}

/// Builds a transformer instance.
pub type Factory = fn() -> Box<dyn Transformer>;

/// Open mapping from transformer names to factories.
pub struct Registry {
    factories: HashMap<String, Factory>,
}

impl Registry {
    /// Creates a registry with no transformers.
    pub fn new() -> Self {
        Registry {
            factories: HashMap::new(),
        }
    }

    /// Creates a registry holding the built-in transformers.
    pub fn with_builtins() -> Self {
        let mut registry = Registry::new();
        registry.register("uppercase", || Box::new(Uppercase));
        registry.register("concatenate", || Box::new(Concatenate));
        registry.register("split", || Box::new(Split));
        registry.register("bmi", || Box::new(Bmi));
        registry
    }

    /// Registers `factory` under `name`, replacing any previous entry.
    pub fn register(&mut self, name: impl Into<String>, factory: Factory) {
        self.factories.insert(name.into(), factory);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Instantiates the transformer registered under `name`.
    pub fn create(&self, name: &str) -> Option<Box<dyn Transformer>> {
        self.factories.get(name).map(|factory| factory())
    }

    /// Registered names in alphabetical order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

pub(crate) fn expect_args(name: &str, args: &[Value], count: usize) -> Result<(), TransformError> {
    if args.len() != count {
        return Err(TransformError::Arity(format!(
            "{} requires exactly {} argument{}, got {}",
            name,
            count,
            if count == 1 { "" } else { "s" },
            args.len()
        )));
    }
    Ok(())
}
