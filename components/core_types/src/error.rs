//! Compile error types.
//!
//! Every fatal condition in the front end is reported through one
//! [`CompileError`]. There is no recoverable error path: the first error
//! stops the whole run.

use crate::SourcePosition;
use thiserror::Error;

/// The kind of fatal front-end error.
///
/// Lexical problems never appear here directly: the scanner reports them as
/// `Unknown` tokens and they surface as syntax errors once the parser fails
/// to match them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The current token is not the one the grammar requires
    SyntaxError,
    /// An identifier was declared twice at the same scope depth
    DuplicateIdentifier,
    /// A construct is missing every legal continuation (e.g. a class body)
    StructuralError,
    /// Symbol table misuse that the parser should never trigger
    InternalError,
}

/// A fatal compile error with message and source position.
///
/// The `Display` form is the single diagnostic line printed before the run
/// halts.
///
/// # Examples
///
/// ```
/// use core_types::{CompileError, ErrorKind};
///
/// let error = CompileError {
///     kind: ErrorKind::SyntaxError,
///     message: "Missing semicolon before '}'".to_string(),
///     source_position: None,
/// };
///
/// assert_eq!(error.to_string(), "ERROR: Missing semicolon before '}'");
/// ```
#[derive(Debug, Clone, Error)]
#[error("ERROR: {message}{}", line_suffix(.source_position.as_ref()))]
pub struct CompileError {
    /// The type of error
    pub kind: ErrorKind,
    /// Human-readable error message
    pub message: String,
    /// Source position where the error occurred
    pub source_position: Option<SourcePosition>,
}

impl CompileError {
    /// Line the error was reported on, if known.
    pub fn line(&self) -> Option<u32> {
        self.source_position.as_ref().map(|pos| pos.line)
    }
}

fn line_suffix(position: Option<&SourcePosition>) -> String {
    match position {
        Some(pos) => format!(", on line {}", pos.line),
        None => String::new(),
    }
}
