use std::fmt;

/// The category of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Field path or transformer name
    ///
    /// Starts with a letter, `_` or `#`, followed by letters, digits, `.`, `_` or `#`.
    ///
    /// # Examples
    /// ```text
    /// name
    /// address.city
    /// friends.#.first
    /// _tempName
    /// ```
    Identifier,

    /// Single-quoted string literal
    ///
    /// The literal keeps its surrounding quotes; consumers decide how to trim them.
    ///
    /// # Examples
    /// ```text
    /// ' '
    /// '/'
    /// ```
    String,

    /// Assignment operator `=`
    Operator,

    /// Left parenthesis opening an argument list
    LParen,

    /// Right parenthesis closing an argument list
    RParen,

    /// Comma separating variables or arguments
    Comma,

    /// Reserved word
    ///
    /// # Examples
    /// ```text
    /// SET
    /// ```
    Keyword,

    /// Line break terminating a program
    EndOfLine,

    /// End of the script, emitted exactly once
    EndOfInput,

    /// Lexical error; the literal carries a human-readable message
    Error,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Identifier => "identifier",
            TokenKind::String => "string",
            TokenKind::Operator => "operator",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::Comma => "','",
            TokenKind::Keyword => "keyword",
            TokenKind::EndOfLine => "end of line",
            TokenKind::EndOfInput => "end of input",
            TokenKind::Error => "error",
        };
        write!(f, "{}", name)
    }
}

/// A token together with its source position.
///
/// `line` is 1-based. `pos` is the 0-based character column of the token's
/// first character within its own line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub line: usize,
    pub pos: usize,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>, line: usize, pos: usize) -> Self {
        Token {
            kind,
            literal: literal.into(),
            line,
            pos,
        }
    }

    /// Returns true if the token has the given kind and literal
    pub fn is(&self, kind: TokenKind, literal: &str) -> bool {
        self.kind == kind && self.literal == literal
    }

    /// Short description used in syntax error messages
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::EndOfLine | TokenKind::EndOfInput => self.kind.to_string(),
            _ => format!("'{}'", self.literal),
        }
    }
}
