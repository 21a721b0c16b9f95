//! MiniJava compiler front end CLI library
//!
//! Provides the Driver struct and supporting modules for the `minijavac`
//! binary: argument parsing, source loading, report printing and logging
//! setup.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod driver;
pub mod error;
pub mod logging;

pub use cli::Cli;
pub use driver::{format_token_table, Driver};
pub use error::{CliError, CliResult};
pub use logging::init_logging;
