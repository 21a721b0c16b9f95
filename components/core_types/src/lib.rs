//! Core types shared by the MiniJava compiler front end.
//!
//! This crate provides the foundational types every other component depends
//! on: the fatal compile error and source location tracking.
//!
//! # Overview
//!
//! - [`CompileError`] - A fatal front-end error with its source position
//! - [`ErrorKind`] - The closed taxonomy of fatal errors
//! - [`SourcePosition`] - Source code location
//!
//! # Examples
//!
//! ```
//! use core_types::{CompileError, ErrorKind, SourcePosition};
//!
//! let error = CompileError {
//!     kind: ErrorKind::DuplicateIdentifier,
//!     message: "Duplicate identifier 'x'".to_string(),
//!     source_position: Some(SourcePosition::at_line(4)),
//! };
//! assert_eq!(error.to_string(), "ERROR: Duplicate identifier 'x', on line 4");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod source;

pub use error::{CompileError, ErrorKind};
pub use source::SourcePosition;
