//! Parsing of process output records
//!
//! Two wire formats cross the process boundary: the listing emits one path
//! per line, the filter emits paths separated by a single NUL byte with no
//! required trailing delimiter. Each record holds exactly one field (a path);
//! empty records are dropped, anything that is not UTF-8 is rejected.
//! Line records are also trimmed of a trailing `\r`, and blank lines skipped.

use super::error::{Result, SearchError};

const NUL: u8 = 0x00;

/// Parse NUL-delimited filter output into paths
///
/// Only empty records are dropped; any other byte is part of a path.
///
/// # Errors
///
/// Returns `SearchError::Malformed` if a record is not valid UTF-8.
pub fn parse_nul_records(output: &[u8]) -> Result<Vec<String>> {
    parse_records(output.split(|&b| b == NUL))
}

/// Parse newline-delimited listing output into paths
///
/// Carriage returns before the newline are stripped and blank lines skipped.
///
/// # Errors
///
/// Returns `SearchError::Malformed` if a line is not valid UTF-8.
pub fn parse_lines(output: &[u8]) -> Result<Vec<String>> {
    parse_records(
        output
            .split(|&b| b == b'\n')
            .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
            .map(|line| if line.iter().all(u8::is_ascii_whitespace) { &[][..] } else { line }),
    )
}

fn parse_records<'a>(records: impl Iterator<Item = &'a [u8]>) -> Result<Vec<String>> {
    records
        .enumerate()
        .filter(|(_, record)| !record.is_empty())
        .map(|(index, record)| {
            std::str::from_utf8(record).map(normalize_path).map_err(|e| {
                SearchError::Malformed(format!("record {} is not valid UTF-8: {e}", index + 1))
            })
        })
        .collect()
}

/// Strip a leading `./` so paths compare equal regardless of which lister produced them
#[must_use]
pub fn normalize_path(path: &str) -> String {
    path.strip_prefix("./").unwrap_or(path).to_string()
}

/// Parse the output of `git rev-parse --is-inside-work-tree`
///
/// # Errors
///
/// Returns `SearchError::Malformed` unless the output is exactly `true` or `false`.
pub fn parse_work_tree_probe(output: &[u8]) -> Result<bool> {
    match std::str::from_utf8(output).map(str::trim) {
        Ok("true") => Ok(true),
        Ok("false") => Ok(false),
        Ok(other) => Err(SearchError::Malformed(format!(
            "unexpected work-tree probe output: '{other}'"
        ))),
        Err(e) => Err(SearchError::Malformed(format!(
            "work-tree probe output is not valid UTF-8: {e}"
        ))),
    }
}
