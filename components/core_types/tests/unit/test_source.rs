//! Unit tests for SourcePosition

use core_types::SourcePosition;

#[cfg(test)]
mod source_position_tests {
    use super::*;

    #[test]
    fn test_source_position_zero_values() {
        let pos = SourcePosition {
            line: 0,
            column: 0,
            offset: 0,
        };

        assert_eq!(pos.line, 0);
        assert_eq!(pos.column, 0);
        assert_eq!(pos.offset, 0);
    }

    #[test]
    fn test_source_position_clone() {
        let pos1 = SourcePosition {
            line: 42,
            column: 7,
            offset: 1000,
        };
        let pos2 = pos1.clone();

        assert_eq!(pos1, pos2);
    }

    #[test]
    fn test_source_position_equality() {
        let pos1 = SourcePosition {
            line: 10,
            column: 20,
            offset: 100,
        };
        let pos3 = SourcePosition {
            line: 11,
            column: 20,
            offset: 100,
        };

        assert_ne!(pos1, pos3);
        assert_eq!(pos1, pos1.clone());
    }

    #[test]
    fn test_source_position_display_includes_column() {
        let pos = SourcePosition {
            line: 2,
            column: 9,
            offset: 30,
        };
        assert_eq!(pos.to_string(), "line 2, column 9");
    }

    #[test]
    fn test_at_line_has_no_column() {
        let pos = SourcePosition::at_line(12);
        assert_eq!(pos.line, 12);
        assert_eq!(pos.column, 0);
        assert_eq!(pos.offset, 0);
    }
}
