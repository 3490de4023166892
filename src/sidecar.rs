//! Append-only text persistence for metadata records.
//!
//! Each saved record is a run of `name: value` lines followed by a blank
//! line and a separator line of dashes. Records only accumulate; nothing is
//! ever rewritten in place, and reloading returns the raw text rather than
//! parsed fields.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

const SEPARATOR_LEN: usize = 40;

/// Appends one record to the sidecar file, creating it if missing.
pub fn append<P: AsRef<Path>>(path: P, fields: &[(&str, String)]) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    for (name, value) in fields {
        writeln!(file, "{}: {}", name, value)?;
    }
    writeln!(file)?;
    writeln!(file, "{}", "-".repeat(SEPARATOR_LEN))?;
    Ok(())
}

/// Returns the accumulated raw text of the sidecar file.
pub fn load<P: AsRef<Path>>(path: P) -> io::Result<String> {
    fs::read_to_string(path)
}
