//! MiniJava Parser Component
//!
//! Provides the scanner, the depth-scoped symbol table and the
//! grammar-driven recursive descent parser of the MiniJava front end.
//!
//! # Overview
//!
//! - [`Scanner`] - Produces one [`Token`] at a time from source text
//! - [`SymbolTable`] - Hash-bucketed, depth-tagged declaration store
//! - [`Parser`] - Recognises the grammar and fills the symbol table
//! - [`DumpSink`] - Receives the per-scope symbol table dumps
//!
//! # Example
//!
//! ```
//! use parser::Parser;
//!
//! let source = "final class Main { public static void main ( String [ ] args ) { } }";
//! let mut parser = Parser::new(source);
//! parser.parse().unwrap();
//!
//! let top_level: Vec<_> = parser.symbol_table().entries_at(1).collect();
//! assert_eq!(top_level[0].name, "Main");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod lexer;
pub mod parser;
pub mod symbol_table;

pub use lexer::{Scanner, Token, TokenKind, MAX_IDENTIFIER_LEN};
pub use parser::{Parser, TOP_LEVEL_DEPTH};
pub use symbol_table::{
    ClassInfo, ConstValue, ConstantInfo, DumpSink, Entry, EntryId, EntryPayload, FunctionInfo,
    StdoutSink, SymbolTable, VarType, VariableInfo, TABLE_SIZE,
};
