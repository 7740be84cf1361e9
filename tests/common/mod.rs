//! Shared fixtures for the integration harnesses.
//!
//! Fixture lines all use one fixed date so tests read as plain
//! `HH:MM:SS` + level + message triples.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// One well-formed log line, trailing newline included.
pub fn entry(hms: &str, level: &str, msg: &str) -> String {
    format!("[Wed Jun 25 2014 {hms} +0000] [{level}] {msg}\n")
}

/// Write `lines` to `name` under `dir` and return the full path.
pub fn write_log(dir: &TempDir, name: &str, lines: &[String]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, lines.concat()).expect("fixture write");
    path
}

/// Deterministic stand-in for the random two-string sequences used to
/// exercise blank-line squeezing: `amount` lines alternating between runs
/// of blanks and the marker text.
pub fn blank_run_sequence(amount: usize) -> Vec<String> {
    (0..amount)
        .map(|i| if i % 3 == 0 { "la".to_string() } else { String::new() })
        .collect()
}
