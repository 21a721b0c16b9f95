//! Front end orchestration
//!
//! The Driver is the collaborator around the parser: it validates and loads
//! the source file, then either prints the token table or runs the parser
//! and forwards its scope dumps to a sink.

use crate::cli::Cli;
use crate::error::{CliError, CliResult};
use parser::{DumpSink, Parser, Scanner, Token};
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};
use tracing::debug;

/// Extension every source file must carry.
pub const SOURCE_EXTENSION: &str = "java";

/// Sink used in quiet mode.
struct Discard;

impl DumpSink for Discard {
    fn write_line(&mut self, _line: &str) {}
}

/// Runs one source file through the front end
#[derive(Debug, Default, Clone)]
pub struct Driver {
    /// Print the token table instead of parsing
    print_tokens: bool,
    /// Drop the scope dumps
    quiet: bool,
}

impl Driver {
    /// Create a driver that parses and reports every scope dump
    ///
    /// # Example
    /// ```
    /// use minijava_cli::Driver;
    ///
    /// let driver = Driver::new();
    /// assert!(!driver.is_quiet());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure a driver from parsed arguments
    pub fn from_cli(cli: &Cli) -> Self {
        Self::new()
            .with_print_tokens(cli.tokens)
            .with_quiet(cli.quiet)
    }

    /// Enable token table printing
    pub fn with_print_tokens(mut self, enabled: bool) -> Self {
        self.print_tokens = enabled;
        self
    }

    /// Enable quiet mode
    pub fn with_quiet(mut self, enabled: bool) -> Self {
        self.quiet = enabled;
        self
    }

    /// Check if token table printing is enabled
    pub fn is_print_tokens_enabled(&self) -> bool {
        self.print_tokens
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Validate `path` and read the whole file.
    ///
    /// # Errors
    /// `FileNotFound` if the path does not exist, `InvalidExtension` if it
    /// does not end in `.java`, `Io` if reading fails.
    pub fn load_source(path: impl AsRef<Path>) -> CliResult<String> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CliError::FileNotFound(path.to_path_buf()));
        }
        if path.extension().and_then(|ext| ext.to_str()) != Some(SOURCE_EXTENSION) {
            return Err(CliError::InvalidExtension(path.to_path_buf()));
        }

        let source = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), bytes = source.len(), "loaded source");
        Ok(source)
    }

    /// Compile a file, collecting the report lines in memory
    ///
    /// # Example
    /// ```no_run
    /// use minijava_cli::Driver;
    ///
    /// let lines = Driver::new().compile_file("Program.java").unwrap();
    /// ```
    pub fn compile_file(&self, path: impl AsRef<Path>) -> CliResult<Vec<String>> {
        self.compile_file_to(path, Vec::new())
    }

    /// Compile a file, writing the report lines to `sink`
    pub fn compile_file_to<S: DumpSink>(&self, path: impl AsRef<Path>, sink: S) -> CliResult<S> {
        let source = Self::load_source(path)?;
        self.compile_source_to(&source, sink)
    }

    /// Compile source text, collecting the report lines in memory
    pub fn compile_source(&self, source: &str) -> CliResult<Vec<String>> {
        self.compile_source_to(source, Vec::new())
    }

    /// Compile source text, writing the report lines to `sink`.
    ///
    /// In token mode the report is the token table and nothing is parsed.
    /// Otherwise it is the sequence of scope dumps, or nothing in quiet mode.
    pub fn compile_source_to<S: DumpSink>(&self, source: &str, mut sink: S) -> CliResult<S> {
        if self.print_tokens {
            for line in format_token_table(&Scanner::tokenize(source)) {
                sink.write_line(&line);
            }
            return Ok(sink);
        }

        if self.quiet {
            Parser::with_sink(source, Discard).parse()?;
            return Ok(sink);
        }

        let mut parser = Parser::with_sink(source, sink);
        parser.parse()?;
        Ok(parser.into_sink())
    }
}

/// One row of the `--tokens` view
#[derive(Tabled)]
struct TokenRow {
    #[tabled(rename = "TOKEN")]
    kind: String,
    #[tabled(rename = "LEXEME")]
    lexeme: String,
    #[tabled(rename = "VALUE")]
    value: String,
    #[tabled(rename = "VALUER")]
    value_r: String,
    #[tabled(rename = "LITERAL")]
    literal: String,
    #[tabled(rename = "LINE")]
    line: u32,
}

impl From<&Token> for TokenRow {
    fn from(token: &Token) -> Self {
        Self {
            kind: format!("{:?}", token.kind),
            lexeme: token.lexeme.clone(),
            value: token.value.map_or_else(|| "-".to_string(), |v| v.to_string()),
            value_r: token.value_r.map_or_else(|| "-".to_string(), |v| v.to_string()),
            literal: token.literal.clone().unwrap_or_else(|| "-".to_string()),
            line: token.line,
        }
    }
}

/// Render tokens as a table: header line, rule line, then one line per token.
///
/// Absent decoded values are shown as `-`.
pub fn format_token_table(tokens: &[Token]) -> Vec<String> {
    let rows: Vec<TokenRow> = tokens.iter().map(TokenRow::from).collect();
    Table::new(rows)
        .with(Style::psql())
        .to_string()
        .lines()
        .map(str::to_string)
        .collect()
}
