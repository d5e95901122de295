// tests/lexer_tests.rs

use setlang::ast::{Token, TokenKind};
use setlang::lexer::{Lexer, tokenize};

fn tok(kind: TokenKind, literal: &str, line: usize, pos: usize) -> Token {
    Token::new(kind, literal, line, pos)
}

fn kinds(input: &str) -> Vec<TokenKind> {
    tokenize(input).into_iter().map(|t| t.kind).collect()
}

// ============================================================================
// Single Line
// ============================================================================

#[test]
fn test_full_program_tokens() {
    let tokens = tokenize("SET bmi, isHealthy = bmi(weight, height)");

    let expected = vec![
        tok(TokenKind::Keyword, "SET", 1, 0),
        tok(TokenKind::Identifier, "bmi", 1, 4),
        tok(TokenKind::Comma, ",", 1, 7),
        tok(TokenKind::Identifier, "isHealthy", 1, 9),
        tok(TokenKind::Operator, "=", 1, 19),
        tok(TokenKind::Identifier, "bmi", 1, 21),
        tok(TokenKind::LParen, "(", 1, 24),
        tok(TokenKind::Identifier, "weight", 1, 25),
        tok(TokenKind::Comma, ",", 1, 31),
        tok(TokenKind::Identifier, "height", 1, 33),
        tok(TokenKind::RParen, ")", 1, 39),
        tok(TokenKind::EndOfInput, "", 1, 40),
    ];
    assert_eq!(tokens, expected);
}

#[test]
fn test_symbols() {
    let test_cases = vec![
        ("=", TokenKind::Operator),
        ("(", TokenKind::LParen),
        (")", TokenKind::RParen),
        (",", TokenKind::Comma),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        let token = lexer.next_token();
        assert_eq!(token.kind, expected, "Failed for input: {}", input);
        assert_eq!(token.literal, input);
        assert_eq!(lexer.next_token().kind, TokenKind::EndOfInput);
    }
}

#[test]
fn test_identifier_characters() {
    let test_cases = vec![
        "name",
        "address.city",
        "favoriteFoods.0",
        "friends.#.first",
        "_tempName",
        "#",
        "São",
    ];

    for input in test_cases {
        let tokens = tokenize(input);
        assert_eq!(tokens.len(), 2, "Failed for input: {}", input);
        assert_eq!(tokens[0], tok(TokenKind::Identifier, input, 1, 0));
    }
}

#[test]
fn test_keyword_lookup() {
    assert_eq!(
        kinds("SET SETTING"),
        vec![TokenKind::Keyword, TokenKind::Identifier, TokenKind::EndOfInput]
    );
}

// ============================================================================
// Strings
// ============================================================================

#[test]
fn test_string_keeps_quotes() {
    let tokens = tokenize("concatenate(' ', a)");
    assert_eq!(tokens[2], tok(TokenKind::String, "' '", 1, 12));
}

#[test]
fn test_unterminated_string() {
    let tokens = tokenize("SET x = split(a, '/)");
    assert_eq!(
        tokens[7],
        tok(TokenKind::Error, "unterminated string literal", 1, 17)
    );
    assert_eq!(tokens[8].kind, TokenKind::EndOfInput);
    assert_eq!(tokens.len(), 9);
}

#[test]
fn test_unterminated_string_stops_at_line_break() {
    let tokens = tokenize("SET x = t('a\nSET y = t(b)");
    assert_eq!(tokens[5].kind, TokenKind::Error);
    assert_eq!(tokens[6], tok(TokenKind::EndOfLine, "\n", 1, 12));
    assert_eq!(tokens[7], tok(TokenKind::Keyword, "SET", 2, 0));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_error_tokens_resume_scanning() {
    let tokens = tokenize("SET name = @123invalid");

    let expected = vec![
        tok(TokenKind::Keyword, "SET", 1, 0),
        tok(TokenKind::Identifier, "name", 1, 4),
        tok(TokenKind::Operator, "=", 1, 9),
        tok(TokenKind::Error, "unexpected character '@'", 1, 11),
        tok(TokenKind::Error, "unexpected character '1'", 1, 12),
        tok(TokenKind::Error, "unexpected character '2'", 1, 13),
        tok(TokenKind::Error, "unexpected character '3'", 1, 14),
        tok(TokenKind::Identifier, "invalid", 1, 15),
        tok(TokenKind::EndOfInput, "", 1, 22),
    ];
    assert_eq!(tokens, expected);
}

// ============================================================================
// Lines and Positions
// ============================================================================

#[test]
fn test_positions_reset_per_line() {
    let tokens = tokenize("SET a = b(c)\n  SET d = e(f)\n");

    assert_eq!(tokens[7], tok(TokenKind::EndOfLine, "\n", 1, 12));
    assert_eq!(tokens[8], tok(TokenKind::Keyword, "SET", 2, 2));
    assert_eq!(tokens[9], tok(TokenKind::Identifier, "d", 2, 6));
    assert_eq!(tokens[15], tok(TokenKind::EndOfLine, "\n", 2, 14));
    assert_eq!(tokens[16], tok(TokenKind::EndOfInput, "", 3, 0));
    assert_eq!(tokens.len(), 17);
}

#[test]
fn test_exactly_one_end_of_input() {
    for input in ["", "\n", "SET a = b(c)", "SET a = b(c)\n\n"] {
        let tokens = tokenize(input);
        let ends = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::EndOfInput)
            .count();
        assert_eq!(ends, 1, "Failed for input: {:?}", input);
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::EndOfInput));
    }
}

#[test]
fn test_iterator_is_finite() {
    let mut lexer = Lexer::new("a");
    assert!(lexer.next().is_some());
    assert!(lexer.next().is_some());
    assert!(lexer.next().is_none());
    assert!(lexer.next().is_none());
}

#[test]
fn test_positions_point_at_literals() {
    let input = "SET _city, _country = split(place, '/')\nSET address.city = uppercase(_city)\n\tSET friends.#.name = uppercase(friends.#.name)";
    let lines: Vec<Vec<char>> = input.split('\n').map(|l| l.chars().collect()).collect();

    let mut rebuilt = String::new();
    for token in tokenize(input) {
        rebuilt.push_str(&token.literal);
        if token.kind == TokenKind::EndOfInput || token.kind == TokenKind::EndOfLine {
            continue;
        }
        let line = &lines[token.line - 1];
        let at: String = line[token.pos..token.pos + token.literal.chars().count()]
            .iter()
            .collect();
        assert_eq!(at, token.literal, "Token {:?} is misplaced", token);
    }

    let significant: String = input.chars().filter(|c| *c != ' ' && *c != '\t').collect();
    assert_eq!(rebuilt, significant);
}
