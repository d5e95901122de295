use std::fmt;

/// Placeholder character that switches a program into iteration mode.
pub const PLACEHOLDER: char = '#';

/// One parsed `SET ... = transformer(...)` instruction.
///
/// Produced by the parser and read by the engine; never mutated afterwards.
///
/// # Examples
/// ```text
/// SET fullName = concatenate(' ', firstName, lastName)
/// SET bmi, isHealthy = bmi(weight, height)
/// SET friends.#.name = uppercase(friends.#.name)
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    /// Target field paths, never empty
    pub variables: Vec<String>,

    /// Transformer name, letters only
    pub transformer: String,

    /// Raw arguments: field paths, or string literals still wrapped in quotes
    pub args: Vec<String>,
}

impl Program {
    pub fn new(
        variables: Vec<String>,
        transformer: impl Into<String>,
        args: Vec<String>,
    ) -> Self {
        Program {
            variables,
            transformer: transformer.into(),
            args,
        }
    }

    /// True if any target path contains the iteration placeholder
    pub fn is_iteration(&self) -> bool {
        self.variables.iter().any(|v| v.contains(PLACEHOLDER))
    }

    /// Target paths that name temporary fields
    pub fn temporaries(&self) -> impl Iterator<Item = &str> {
        self.variables
            .iter()
            .map(String::as_str)
            .filter(|v| is_temporary(v))
    }
}

/// A path is temporary when its root or leaf segment starts with `_`.
pub fn is_temporary(path: &str) -> bool {
    let root = path.split('.').next().unwrap_or_default();
    let leaf = path.rsplit('.').next().unwrap_or_default();
    root.starts_with('_') || leaf.starts_with('_')
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SET {} = {}({})",
            self.variables.join(", "),
            self.transformer,
            self.args.join(", ")
        )
    }
}
