//! Scanner -> Parser -> SymbolTable integration tests
//!
//! Tests that the token stream the scanner produces is exactly what the
//! parser consumes, and that the symbol table only keeps top-level entries
//! once a parse finishes.

use core_types::ErrorKind;
use parser::{EntryPayload, Parser, Scanner, TokenKind, TOP_LEVEL_DEPTH};

const PROGRAM: &str = "\
class Point {
    int x, y;
    public int sum ( ) { return x + y; }
}
final class Main {
    public static void main ( String [ ] args ) {
        p = 1;
    }
}
";

/// Test: a valid program scans without unknown tokens and parses
#[test]
fn test_valid_program_scans_cleanly_and_parses() {
    let tokens = Scanner::tokenize(PROGRAM);
    assert!(tokens.iter().all(|t| t.kind != TokenKind::Unknown));
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
    assert_eq!(tokens.last().map(|t| t.line), Some(10));

    let mut parser = Parser::new(PROGRAM);
    parser.parse().expect("program should parse");
}

/// Test: only top-level entries survive the parse
#[test]
fn test_only_top_level_survives() {
    let mut parser = Parser::new(PROGRAM);
    parser.parse().unwrap();

    let table = parser.symbol_table();
    assert_eq!(parser.depth(), TOP_LEVEL_DEPTH);
    assert_eq!(table.len(), 2);
    assert_eq!(table.entries_at(TOP_LEVEL_DEPTH).count(), 2);

    for name in ["x", "y", "sum", "main"] {
        assert!(table.lookup(name).is_none(), "{} should be purged", name);
    }

    match table.lookup("Point").and_then(|e| e.payload.as_ref()) {
        Some(EntryPayload::Class(info)) => {
            assert_eq!(info.local_size, 4);
            assert_eq!(info.method_names, vec!["sum"]);
            assert_eq!(info.variable_names, vec!["x", "y"]);
        }
        other => panic!("expected class payload, got {:?}", other),
    }
}

/// Test: an unknown token stops the parse with a syntax error on its line
#[test]
fn test_unknown_token_becomes_syntax_error() {
    let source = PROGRAM.replace("p = 1;", "p = 1 @ 2;");
    let tokens = Scanner::tokenize(&source);
    let unknown = tokens
        .iter()
        .find(|t| t.kind == TokenKind::Unknown)
        .expect("scanner should flag '@'");
    assert_eq!(unknown.line, 7);

    let err = Parser::new(&source).parse().unwrap_err();
    assert_eq!(err.kind, ErrorKind::SyntaxError);
    assert_eq!(err.line(), Some(7));
}

/// Test: identifier over the length limit cannot be declared
#[test]
fn test_overlong_identifier_cannot_be_declared() {
    let long_name = "v".repeat(parser::MAX_IDENTIFIER_LEN + 1);
    let source = PROGRAM.replace("int x, y;", &format!("int {};", long_name));

    let err = Parser::new(&source).parse().unwrap_err();
    assert_eq!(err.message, "Expected identifier, found unknown token");
    assert_eq!(err.line(), Some(2));
}

/// Test: unterminated block comment ends the input early
#[test]
fn test_unterminated_comment_truncates_program() {
    let source = PROGRAM.replace("p = 1;", "/* p = 1;");
    let err = Parser::new(&source).parse().unwrap_err();
    assert_eq!(err.message, "Unexpected end of file, expected '}'");
}

/// Test: string literal tokens never satisfy the grammar
#[test]
fn test_string_literal_in_expression_is_rejected() {
    let source = PROGRAM.replace("p = 1;", "p = \"one\";");
    let err = Parser::new(&source).parse().unwrap_err();
    assert_eq!(err.message, "Missing semicolon before string literal");
}
