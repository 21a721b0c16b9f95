//! MiniJava compiler front end
//!
//! Entry point for `minijavac`. Parses CLI arguments and delegates to the
//! Driver. Any failure prints one diagnostic line and exits with status 1.

use clap::Parser as ClapParser;
use minijava_cli::{init_logging, Cli, CliError, Driver};
use parser::StdoutSink;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let driver = Driver::from_cli(&cli);
    match driver.compile_file_to(&cli.file, StdoutSink) {
        Ok(_) => {}
        Err(CliError::Compile(e)) => {
            println!("{}", e);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
