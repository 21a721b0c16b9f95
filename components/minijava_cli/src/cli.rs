//! Command line arguments

use clap::Parser as ClapParser;

/// MiniJava compiler front end
#[derive(Debug, Clone, PartialEq, ClapParser)]
#[command(name = "minijavac", version, about = "Scan and parse a MiniJava source file")]
pub struct Cli {
    /// MiniJava source file (must end in .java)
    #[arg(value_name = "FILE")]
    pub file: String,

    /// Print the token table instead of parsing
    #[arg(short = 't', long = "tokens")]
    pub tokens: bool,

    /// Suppress the symbol table dumps on success
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Arguments for compiling `file` with every option off
    pub fn with_file(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            tokens: false,
            quiet: false,
            verbose: 0,
        }
    }
}
