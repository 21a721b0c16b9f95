//! Integration test suite for the MiniJava front end
//!
//! This crate provides integration tests that verify components work
//! together correctly across component boundaries.

/// Re-export components for test convenience
pub mod components {
    pub use core_types;
    pub use minijava_cli;
    pub use parser;
}
