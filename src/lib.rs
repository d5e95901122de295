pub mod ast;
pub mod cli;
pub mod document;
pub mod engine;
pub mod lexer;
pub mod parser;
pub mod transformer;
pub mod value;

pub use ast::{Program, Token, TokenKind};
pub use document::PathError;
pub use engine::{Engine, EngineError};
pub use lexer::{Lexer, tokenize};
pub use parser::{ParseError, Parser, format_diagnostic, parse_script};
pub use transformer::{Registry, Results, TransformError, Transformer};
pub use value::Value;
