//! Contract compliance tests for core_types
//!
//! These tests pin the public surface other components rely on.

use core_types::{CompileError, ErrorKind, SourcePosition};

/// Contract: every fatal condition of the front end has an ErrorKind
#[test]
fn test_error_kind_covers_fatal_taxonomy() {
    let kinds = [
        ErrorKind::SyntaxError,
        ErrorKind::DuplicateIdentifier,
        ErrorKind::StructuralError,
        ErrorKind::InternalError,
    ];
    assert_eq!(kinds.len(), 4);
}

/// Contract: CompileError exposes kind, message and optional position
#[test]
fn test_compile_error_public_fields() {
    let error = CompileError {
        kind: ErrorKind::SyntaxError,
        message: String::from("msg"),
        source_position: Option::<SourcePosition>::None,
    };
    let _: &ErrorKind = &error.kind;
    let _: &String = &error.message;
    let _: &Option<SourcePosition> = &error.source_position;
}

/// Contract: the diagnostic line starts with "ERROR: " and ends with the line
#[test]
fn test_diagnostic_line_format() {
    let error = CompileError {
        kind: ErrorKind::SyntaxError,
        message: String::from("Missing main class definition"),
        source_position: Some(SourcePosition::at_line(14)),
    };
    let line = error.to_string();
    assert!(line.starts_with("ERROR: "));
    assert!(line.ends_with(", on line 14"));
    assert!(!line.contains('\n'));
}
