// tests/parser_tests.rs

use setlang::ast::Program;
use setlang::lexer::Lexer;
use setlang::parser::{ParseError, Parser, format_diagnostic, parse_script};

fn parse_one(input: &str) -> Result<Program, ParseError> {
    Parser::new(Lexer::new(input)).parse_one()
}

fn program(variables: &[&str], transformer: &str, args: &[&str]) -> Program {
    Program::new(
        variables.iter().map(|s| s.to_string()).collect(),
        transformer,
        args.iter().map(|s| s.to_string()).collect(),
    )
}

fn parse_err(input: &str) -> ParseError {
    match parse_script(input) {
        Ok(programs) => panic!("Expected syntax error for {:?}, got {:?}", input, programs),
        Err(e) => e,
    }
}

// ============================================================================
// Single Programs
// ============================================================================

#[test]
fn test_parse_simple_program() {
    let parsed = parse_one("SET a = t(b, c)").unwrap();
    assert_eq!(parsed, program(&["a"], "t", &["b", "c"]));
}

#[test]
fn test_parse_multiple_variables() {
    let parsed = parse_one("SET bmi, isHealthy = bmi(weight, height)").unwrap();
    assert_eq!(
        parsed,
        program(&["bmi", "isHealthy"], "bmi", &["weight", "height"])
    );
}

#[test]
fn test_parse_string_arguments_keep_quotes() {
    let parsed = parse_one("SET fullName = concatenate(' ', firstName, lastName)").unwrap();
    assert_eq!(parsed.args, vec!["' '", "firstName", "lastName"]);
}

#[test]
fn test_parse_paths_and_placeholders() {
    let parsed = parse_one("SET friends.#.name = uppercase(friends.#.name)").unwrap();
    assert_eq!(
        parsed,
        program(&["friends.#.name"], "uppercase", &["friends.#.name"])
    );
    assert!(parsed.is_iteration());
}

#[test]
fn test_parse_empty_argument_list() {
    let parsed = parse_one("SET now = timestamp()").unwrap();
    assert_eq!(parsed, program(&["now"], "timestamp", &[]));
}

#[test]
fn test_program_display_is_canonical() {
    let parsed = parse_one("SET   a,b=concatenate( '-' ,x,y )").unwrap();
    assert_eq!(parsed.to_string(), "SET a, b = concatenate('-', x, y)");
}

// ============================================================================
// Scripts
// ============================================================================

#[test]
fn test_parse_script_in_order() {
    let programs = parse_script(
        "SET _city, _country = split(place, '/')\nSET address.city = uppercase(_city)\n",
    )
    .unwrap();

    assert_eq!(
        programs,
        vec![
            program(&["_city", "_country"], "split", &["place", "'/'"]),
            program(&["address.city"], "uppercase", &["_city"]),
        ]
    );
}

#[test]
fn test_parse_script_without_trailing_newline() {
    let programs = parse_script("SET a = t(b)\nSET c = t(d)").unwrap();
    assert_eq!(programs.len(), 2);
}

#[test]
fn test_parse_script_skips_blank_lines() {
    let programs = parse_script("\nSET a = t(b)\n\n   \nSET c = t(d)\n\n").unwrap();
    assert_eq!(programs.len(), 2);
}

#[test]
fn test_parse_empty_script() {
    assert!(parse_script("").unwrap().is_empty());
}

// ============================================================================
// Syntax Errors
// ============================================================================

#[test]
fn test_unterminated_call_diagnostic() {
    let err = parse_err("SET a, b = concatenate(name, surname");

    assert_eq!(err.line, 1);
    assert_eq!(err.pos, 36);
    assert_eq!(
        err.to_string(),
        format!(
            "unexpected token in arguments, found end of input at line 1, position 36\nSET a, b = concatenate(name, surname\n{}^",
            " ".repeat(36)
        )
    );
}

#[test]
fn test_error_positions() {
    let test_cases = vec![
        ("a = t(x)", 0, "expected 'SET' keyword, found 'a'"),
        ("SET = t(x)", 4, "expected variable name, found '='"),
        ("SET a b = t(x)", 6, "unexpected token in variables, found 'b'"),
        ("SET a, = t(x)", 7, "expected variable name, found '='"),
        ("SET a t(x)", 6, "unexpected token in variables, found 't'"),
        ("SET a = t x", 10, "expected symbol '(', found 'x'"),
        ("SET a = t(x,)", 12, "expected argument (field or string), found ')'"),
        ("SET a = t(x y)", 12, "unexpected token in arguments, found 'y'"),
        ("SET a = 'lit'(x)", 8, "expected transformer name, found ''lit''"),
        ("SET a = t(x) extra", 13, "expected end of line or end of input, found 'extra'"),
    ];

    for (input, pos, message) in test_cases {
        let err = parse_err(input);
        assert_eq!(err.line, 1, "Failed for input: {}", input);
        assert_eq!(err.pos, pos, "Failed for input: {}", input);
        assert_eq!(err.message, message, "Failed for input: {}", input);
        assert_eq!(err.source_line, input);
    }
}

#[test]
fn test_transformer_name_must_be_letters() {
    for input in ["SET a = up_per(x)", "SET a = upper2(x)", "SET a = up.per(x)", "SET a = #(x)"] {
        let err = parse_err(input);
        assert_eq!(err.pos, 8, "Failed for input: {}", input);
        assert!(
            err.message.starts_with("invalid transformer name"),
            "Failed for input: {}: {}",
            input,
            err.message
        );
    }
}

#[test]
fn test_lexer_error_surfaces_in_parser() {
    let err = parse_err("SET a = t(@)");
    assert_eq!(err.pos, 10);
    assert_eq!(err.message, "unexpected character '@'");
}

#[test]
fn test_error_on_second_line_echoes_that_line() {
    let err = parse_err("SET a = t(x)\nSET b = t(y");
    assert_eq!(err.line, 2);
    assert_eq!(err.pos, 11);
    assert_eq!(err.source_line, "SET b = t(y");
    assert!(err.to_string().ends_with("\nSET b = t(y\n           ^"));
}

#[test]
fn test_format_diagnostic() {
    assert_eq!(
        format_diagnostic("oops", "SET a = b", 4),
        "oops\nSET a = b\n    ^"
    );
    assert_eq!(format_diagnostic("oops", "", 0), "oops\n\n^");
}
