//! Error types for the CLI

use core_types::CompileError;
use std::path::PathBuf;
use thiserror::Error;

/// CLI-specific errors
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O error
    #[error("File error: {0}")]
    Io(#[from] std::io::Error),

    /// The source path does not exist
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The source path does not name a `.java` file
    #[error("Invalid source file '{}': expected a .java file", .0.display())]
    InvalidExtension(PathBuf),

    /// Scanning or parsing failed
    #[error(transparent)]
    Compile(#[from] CompileError),
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
