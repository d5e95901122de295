//! # setlang - Syntax Tree
//!
//! The language is deliberately flat: a script is an ordered list of
//! programs, and every program assigns the output of one transformer call to
//! one or more fields.
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[program]** - The parsed instruction consumed by the engine
//!
//! ## Quick Start
//!
//! ```text
//! SET _tempName = concatenate(' ', firstName, lastName)
//! SET fullName = uppercase(_tempName)
//! SET bmi, isHealthy = bmi(weight, height)
//! SET friends.#.name = uppercase(friends.#.name)
//! ```
//!
//! ## Core Concepts
//!
//! ### Paths
//!
//! Variables and field arguments are dot-separated paths. Numeric segments
//! address array elements (`favoriteFoods.0`).
//!
//! ### Iteration
//!
//! A `#` segment in the target path runs the transformer once per element
//! of the array that precedes it.
//!
//! ### Temporaries
//!
//! Fields whose root or leaf segment starts with `_` live only for the
//! duration of a script and are removed once every program has run.
pub mod program;
pub mod tokens;

pub use program::{PLACEHOLDER, Program, is_temporary};
pub use tokens::{Token, TokenKind};
