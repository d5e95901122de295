use std::{collections::HashMap, sync::LazyLock};

use crate::ast::{Token, TokenKind};

static KEYWORDS: LazyLock<HashMap<&'static str, TokenKind>> =
    LazyLock::new(|| HashMap::from([("SET", TokenKind::Keyword)]));

static SYMBOLS: LazyLock<HashMap<char, TokenKind>> = LazyLock::new(|| {
    HashMap::from([
        ('=', TokenKind::Operator),
        ('(', TokenKind::LParen),
        (')', TokenKind::RParen),
        (',', TokenKind::Comma),
    ])
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Text,
    String,
    Word,
    Done,
}

/// Pull-based tokenizer.
///
/// Scanning never aborts: an unexpected character becomes an
/// [`TokenKind::Error`] token and scanning resumes at the next character.
/// The stream always ends with exactly one [`TokenKind::EndOfInput`] when
/// consumed as an iterator.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    start: usize,
    line: usize,
    line_start: usize,
    state: State,
    exhausted: bool,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            start: 0,
            line: 1,
            line_start: 0,
            state: State::Text,
            exhausted: false,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn column(&self, at: usize) -> usize {
        at - self.line_start
    }

    fn emit(&mut self, kind: TokenKind) -> Token {
        let literal: String = self.input[self.start..self.position].iter().collect();
        let token = Token::new(kind, literal, self.line, self.column(self.start));
        self.start = self.position;
        token
    }

    fn emit_error(&mut self, message: String) -> Token {
        let token = Token::new(TokenKind::Error, message, self.line, self.column(self.start));
        self.start = self.position;
        token
    }

    fn end_of_input(&self) -> Token {
        Token::new(
            TokenKind::EndOfInput,
            "",
            self.line,
            self.column(self.position),
        )
    }

    /// Returns the text of a 1-based source line without its line break.
    pub fn source_line(&self, line: usize) -> String {
        self.input
            .split(|c| *c == '\n')
            .nth(line.saturating_sub(1))
            .map(|chars| {
                let text: String = chars.iter().collect();
                text.trim_end_matches('\r').to_string()
            })
            .unwrap_or_default()
    }

    /// Produces the next token. Once the input is exhausted every call
    /// returns the same `EndOfInput` token.
    pub fn next_token(&mut self) -> Token {
        loop {
            let token = match self.state {
                State::Text => self.lex_text(),
                State::String => Some(self.lex_string()),
                State::Word => Some(self.lex_word()),
                State::Done => Some(self.end_of_input()),
            };
            if let Some(token) = token {
                return token;
            }
        }
    }

    /// Returns `None` when switching into another state.
    fn lex_text(&mut self) -> Option<Token> {
        loop {
            self.start = self.position;

            match self.current_char() {
                None => {
                    self.state = State::Done;
                    return Some(self.end_of_input());
                }
                Some('\n') => {
                    self.advance();
                    let token = self.emit(TokenKind::EndOfLine);
                    self.line += 1;
                    self.line_start = self.position;
                    self.start = self.position;
                    return Some(token);
                }
                Some(ch) if ch.is_whitespace() => self.advance(),
                Some('\'') => {
                    self.state = State::String;
                    return None;
                }
                Some(ch) if ch.is_alphabetic() || ch == '_' || ch == '#' => {
                    self.state = State::Word;
                    return None;
                }
                Some(ch) => {
                    self.advance();
                    if let Some(kind) = SYMBOLS.get(&ch) {
                        return Some(self.emit(*kind));
                    }
                    return Some(self.emit_error(format!("unexpected character '{}'", ch)));
                }
            }
        }
    }

    fn lex_string(&mut self) -> Token {
        self.advance(); // opening quote

        loop {
            match self.current_char() {
                Some('\'') => {
                    self.advance();
                    self.state = State::Text;
                    return self.emit(TokenKind::String);
                }
                // Strings never span lines
                None | Some('\n') => {
                    self.state = State::Text;
                    return self.emit_error("unterminated string literal".to_string());
                }
                Some(_) => self.advance(),
            }
        }
    }

    fn lex_word(&mut self) -> Token {
        while let Some(ch) = self.current_char() {
            if is_word_char(ch) {
                self.advance();
            } else {
                break;
            }
        }

        self.state = State::Text;
        let word: String = self.input[self.start..self.position].iter().collect();
        match KEYWORDS.get(word.as_str()) {
            Some(kind) => self.emit(*kind),
            None => self.emit(TokenKind::Identifier),
        }
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '.' || ch == '_' || ch == '#'
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.exhausted {
            return None;
        }
        let token = self.next_token();
        if token.kind == TokenKind::EndOfInput {
            self.exhausted = true;
        }
        Some(token)
    }
}

/// Tokenizes a whole script, including the trailing `EndOfInput`.
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).collect()
}

#[test]
fn test_keyword_is_case_sensitive() {
    let mut lexer = Lexer::new("SET set");
    assert_eq!(lexer.next_token().kind, TokenKind::Keyword);
    assert_eq!(lexer.next_token().kind, TokenKind::Identifier);
    assert_eq!(lexer.next_token().kind, TokenKind::EndOfInput);
}

#[test]
fn test_end_of_input_repeats() {
    let mut lexer = Lexer::new("a");
    assert_eq!(lexer.next_token().kind, TokenKind::Identifier);
    let first = lexer.next_token();
    let second = lexer.next_token();
    assert_eq!(first.kind, TokenKind::EndOfInput);
    assert_eq!(first, second);
}

#[test]
fn test_source_line() {
    let lexer = Lexer::new("SET a = b(c)\r\nSET d = e(f)");
    assert_eq!(lexer.source_line(1), "SET a = b(c)");
    assert_eq!(lexer.source_line(2), "SET d = e(f)");
    assert_eq!(lexer.source_line(3), "");
}
