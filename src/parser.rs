use std::{fmt, sync::LazyLock};

use regex::Regex;

use crate::{
    ast::{Program, Token, TokenKind},
    lexer::Lexer,
};

static TRANSFORMER_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]+$").expect("transformer name pattern"));

/// A syntax error positioned at the offending token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    /// 1-based line of the offending token
    pub line: usize,
    /// 0-based column of the offending token within its line
    pub pos: usize,
    /// Text of the offending line, echoed in the diagnostic
    pub source_line: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = format!("{} at line {}, position {}", self.message, self.line, self.pos);
        write!(f, "{}", format_diagnostic(&message, &self.source_line, self.pos))
    }
}

impl std::error::Error for ParseError {}

/// Renders `message`, the source line, and a caret under column `pos`.
///
/// ```text
/// unexpected token in arguments at line 1, position 36
/// SET a, b = concatenate(name, surname
///                                     ^
/// ```
pub fn format_diagnostic(message: &str, source_line: &str, pos: usize) -> String {
    format!("{}\n{}\n{}^", message, source_line, " ".repeat(pos))
}

/// Recursive-descent parser over a one-token lookahead buffer.
pub struct Parser {
    lexer: Lexer,
    peeked: Option<Token>,
}

impl Parser {
    pub fn new(lexer: Lexer) -> Self {
        Parser {
            lexer,
            peeked: None,
        }
    }

    fn next_token(&mut self) -> Token {
        match self.peeked.take() {
            Some(token) => token,
            None => self.lexer.next_token(),
        }
    }

    fn peek_token(&mut self) -> &Token {
        let lexer = &mut self.lexer;
        self.peeked.get_or_insert_with(|| lexer.next_token())
    }

    fn error(&self, token: &Token, expected: &str) -> ParseError {
        let message = match token.kind {
            TokenKind::Error => token.literal.clone(),
            _ => format!("{}, found {}", expected, token.describe()),
        };
        ParseError {
            message,
            line: token.line,
            pos: token.pos,
            source_line: self.lexer.source_line(token.line),
        }
    }

    /// Parses a single program.
    pub fn parse_one(&mut self) -> Result<Program, ParseError> {
        let token = self.next_token();
        if !token.is(TokenKind::Keyword, "SET") {
            return Err(self.error(&token, "expected 'SET' keyword"));
        }

        let variables = self.parse_variables()?;

        let token = self.next_token();
        if !token.is(TokenKind::Operator, "=") {
            return Err(self.error(&token, "expected operator '='"));
        }

        let (transformer, args) = self.parse_transformer()?;

        Ok(Program {
            variables,
            transformer,
            args,
        })
    }

    /// Parses programs until the end of input.
    ///
    /// Each program must be followed by a line break or the end of input.
    /// Blank lines between programs are skipped.
    pub fn parse_all(&mut self) -> Result<Vec<Program>, ParseError> {
        let mut programs = vec![];

        loop {
            while self.peek_token().kind == TokenKind::EndOfLine {
                self.next_token();
            }
            if self.peek_token().kind == TokenKind::EndOfInput {
                break;
            }

            programs.push(self.parse_one()?);

            let token = self.next_token();
            match token.kind {
                TokenKind::EndOfLine => {}
                TokenKind::EndOfInput => break,
                _ => return Err(self.error(&token, "expected end of line or end of input")),
            }
        }

        Ok(programs)
    }

    fn parse_variables(&mut self) -> Result<Vec<String>, ParseError> {
        let first = self.next_token();
        if first.kind != TokenKind::Identifier {
            return Err(self.error(&first, "expected variable name"));
        }
        let mut variables = vec![first.literal];

        loop {
            let next = self.peek_token();
            if next.is(TokenKind::Operator, "=") {
                break;
            }
            if next.kind != TokenKind::Comma {
                let next = next.clone();
                return Err(self.error(&next, "unexpected token in variables"));
            }

            self.next_token(); // consume ','
            let variable = self.next_token();
            if variable.kind != TokenKind::Identifier {
                return Err(self.error(&variable, "expected variable name"));
            }
            variables.push(variable.literal);
        }

        Ok(variables)
    }

    fn parse_transformer(&mut self) -> Result<(String, Vec<String>), ParseError> {
        let name = self.next_token();
        if name.kind != TokenKind::Identifier {
            return Err(self.error(&name, "expected transformer name"));
        }
        if !TRANSFORMER_NAME.is_match(&name.literal) {
            return Err(self.error(&name, "invalid transformer name (letters only)"));
        }

        let token = self.next_token();
        if token.kind != TokenKind::LParen {
            return Err(self.error(&token, "expected symbol '('"));
        }

        let mut args = vec![];

        // Empty argument list
        if self.peek_token().kind == TokenKind::RParen {
            self.next_token();
            return Ok((name.literal, args));
        }

        loop {
            let arg = self.next_token();
            if arg.kind != TokenKind::Identifier && arg.kind != TokenKind::String {
                return Err(self.error(&arg, "expected argument (field or string)"));
            }
            args.push(arg.literal);

            let next = self.next_token();
            match next.kind {
                TokenKind::Comma => {}
                TokenKind::RParen => break,
                _ => return Err(self.error(&next, "unexpected token in arguments")),
            }
        }

        Ok((name.literal, args))
    }
}

/// Parses a complete script into its ordered programs.
pub fn parse_script(input: &str) -> Result<Vec<Program>, ParseError> {
    Parser::new(Lexer::new(input)).parse_all()
}
