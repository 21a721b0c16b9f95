//! End-to-End CLI Integration Tests
//!
//! Tests the complete front end through the minijava_cli Driver API.
//! This is the highest level integration test - file on disk to report.

use minijava_cli::{CliError, Driver};
use parser::{DumpSink, Entry, EntryPayload};
use std::fs;
use tempfile::TempDir;

const SOURCE: &str = "\
class Account {
    final int LIMIT = 100;
    int balance;
    boolean frozen;
    public int deposit ( int amount ) {
        int next;
        next = balance + amount;
        balance = next;
        return balance;
    }
}
final class Main {
    public static void main ( String [ ] args ) {
        total = 0;
    }
}
";

/// Sink that keeps classified entries from every dump
#[derive(Default)]
struct Collect {
    headers: Vec<String>,
    entries: Vec<Entry>,
}

impl DumpSink for Collect {
    fn write_line(&mut self, line: &str) {
        self.headers.push(line.to_string());
    }

    fn write_entry(&mut self, entry: &Entry) {
        self.entries.push(entry.clone());
    }
}

fn write_program(dir: &TempDir, source: &str) -> std::path::PathBuf {
    let path = dir.path().join("Program.java");
    fs::write(&path, source).unwrap();
    path
}

/// Test: every scope is reported, innermost first
#[test]
fn test_e2e_scope_headers() {
    let dir = TempDir::new().unwrap();
    let path = write_program(&dir, SOURCE);

    let sink = Driver::new().compile_file_to(&path, Collect::default()).unwrap();
    assert_eq!(
        sink.headers,
        vec![
            "-- depth 3 --", // deposit
            "-- depth 2 --", // Account
            "-- depth 3 --", // main
            "-- depth 2 --", // Main
            "-- depth 1 --",
        ]
    );
}

/// Test: frame layout of the method and class
#[test]
fn test_e2e_frame_layout() {
    let dir = TempDir::new().unwrap();
    let path = write_program(&dir, SOURCE);

    let sink = Driver::new().compile_file_to(&path, Collect::default()).unwrap();
    let payload = |name: &str| {
        sink.entries
            .iter()
            .find(|e| e.name == name)
            .and_then(|e| e.payload.clone())
    };

    match payload("deposit") {
        Some(EntryPayload::Function(info)) => {
            assert_eq!(info.param_count, 1);
            assert_eq!(info.local_size, 4);
        }
        other => panic!("expected function, got {:?}", other),
    }

    match payload("Account") {
        Some(EntryPayload::Class(info)) => {
            assert_eq!(info.local_size, 5);
            assert_eq!(info.method_names, vec!["deposit"]);
            assert_eq!(info.variable_names, vec!["LIMIT", "balance", "frozen"]);
        }
        other => panic!("expected class, got {:?}", other),
    }

    match payload("frozen") {
        Some(EntryPayload::Variable(info)) => assert_eq!(info.offset, 4),
        other => panic!("expected variable, got {:?}", other),
    }
}

/// Test: quiet mode writes nothing to the sink
#[test]
fn test_e2e_quiet() {
    let dir = TempDir::new().unwrap();
    let path = write_program(&dir, SOURCE);

    let sink = Driver::new()
        .with_quiet(true)
        .compile_file_to(&path, Collect::default())
        .unwrap();
    assert!(sink.headers.is_empty());
    assert!(sink.entries.is_empty());
}

/// Test: compile error surfaces through the driver unchanged
#[test]
fn test_e2e_error_passthrough() {
    let dir = TempDir::new().unwrap();
    let path = write_program(&dir, &SOURCE.replace("int next;", "int amount;"));

    match Driver::new().compile_file(&path) {
        Err(CliError::Compile(e)) => {
            assert_eq!(e.to_string(), "ERROR: Duplicate identifier 'amount', on line 6");
        }
        other => panic!("expected compile error, got {:?}", other),
    }
}

/// Test: token table rows follow source order
#[test]
fn test_e2e_token_table() {
    let dir = TempDir::new().unwrap();
    let path = write_program(&dir, SOURCE);

    let lines = Driver::new()
        .with_print_tokens(true)
        .compile_file(&path)
        .unwrap();
    let kinds: Vec<&str> = lines[2..]
        .iter()
        .take(4)
        .map(|l| l.split('|').next().unwrap_or("").trim())
        .collect();
    assert_eq!(kinds, vec!["Class", "Identifier", "LBrace", "Final"]);
    assert!(lines.last().is_some_and(|l| l.trim_start().starts_with("Eof")));
}
