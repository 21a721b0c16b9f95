//! Parser error types and helpers

use crate::lexer::TokenKind;
use core_types::{CompileError, ErrorKind, SourcePosition};

/// Create a syntax error at a given position
pub fn syntax_error(message: impl Into<String>, position: Option<SourcePosition>) -> CompileError {
    CompileError {
        kind: ErrorKind::SyntaxError,
        message: message.into(),
        source_position: position,
    }
}

/// Create an unexpected token error.
///
/// A few expectations get a dedicated message; everything else names both
/// token kinds.
pub fn unexpected_token(
    expected: TokenKind,
    actual: TokenKind,
    position: Option<SourcePosition>,
) -> CompileError {
    let message = match (expected, actual) {
        (TokenKind::Semicolon, _) => format!("Missing semicolon before {}", actual),
        (TokenKind::Final, _) => "Missing main class definition".to_string(),
        (TokenKind::Public, _) => "Expected main class function".to_string(),
        (_, TokenKind::Eof) => format!("Unexpected end of file, expected {}", expected),
        _ => format!("Expected {}, found {}", expected, actual),
    };
    syntax_error(message, position)
}

/// Create a duplicate identifier error
pub fn duplicate_identifier(name: &str, position: Option<SourcePosition>) -> CompileError {
    CompileError {
        kind: ErrorKind::DuplicateIdentifier,
        message: format!("Duplicate identifier '{}'", name),
        source_position: position,
    }
}

/// Create a structural error (a construct with no legal continuation)
pub fn structural_error(message: impl Into<String>, position: Option<SourcePosition>) -> CompileError {
    CompileError {
        kind: ErrorKind::StructuralError,
        message: message.into(),
        source_position: position,
    }
}

/// Create an internal error
pub fn internal_error(message: impl Into<String>) -> CompileError {
    CompileError {
        kind: ErrorKind::InternalError,
        message: message.into(),
        source_position: None,
    }
}
