//! Unit tests for CompileError and ErrorKind

use core_types::{CompileError, ErrorKind, SourcePosition};

#[cfg(test)]
mod error_kind_tests {
    use super::*;

    #[test]
    fn test_error_kind_clone() {
        let kind1 = ErrorKind::DuplicateIdentifier;
        let kind2 = kind1.clone();
        assert!(matches!(kind2, ErrorKind::DuplicateIdentifier));
    }

    #[test]
    fn test_error_kind_debug() {
        let debug_str = format!("{:?}", ErrorKind::StructuralError);
        assert!(debug_str.contains("StructuralError"));
    }

    #[test]
    fn test_error_kind_equality() {
        assert_eq!(ErrorKind::SyntaxError, ErrorKind::SyntaxError);
        assert_ne!(ErrorKind::SyntaxError, ErrorKind::InternalError);
    }
}

#[cfg(test)]
mod compile_error_tests {
    use super::*;

    #[test]
    fn test_compile_error_without_position() {
        let error = CompileError {
            kind: ErrorKind::InternalError,
            message: "entry vanished".to_string(),
            source_position: None,
        };

        assert_eq!(error.line(), None);
        assert_eq!(error.to_string(), "ERROR: entry vanished");
    }

    #[test]
    fn test_compile_error_with_position() {
        let error = CompileError {
            kind: ErrorKind::DuplicateIdentifier,
            message: "Duplicate identifier 'count'".to_string(),
            source_position: Some(SourcePosition {
                line: 5,
                column: 9,
                offset: 77,
            }),
        };

        assert_eq!(error.line(), Some(5));
        assert_eq!(
            error.to_string(),
            "ERROR: Duplicate identifier 'count', on line 5"
        );
    }

    #[test]
    fn test_compile_error_is_std_error() {
        fn takes_error(_: &dyn std::error::Error) {}

        let error = CompileError {
            kind: ErrorKind::SyntaxError,
            message: "Unexpected end of file, expected '}'".to_string(),
            source_position: Some(SourcePosition::at_line(1)),
        };
        takes_error(&error);
    }

    #[test]
    fn test_compile_error_clone_keeps_fields() {
        let error = CompileError {
            kind: ErrorKind::StructuralError,
            message: "Missing class body".to_string(),
            source_position: Some(SourcePosition::at_line(8)),
        };
        let copy = error.clone();

        assert_eq!(copy.kind, ErrorKind::StructuralError);
        assert_eq!(copy.message, error.message);
        assert_eq!(copy.source_position, error.source_position);
    }
}
