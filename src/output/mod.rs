//! Output formatting for CLI display
//!
//! This module provides the output writers and the line formats used for
//! search results, tagged files and status lines.

pub mod writer;

pub use writer::{BufferedWriter, MessageLevel, OutputWriter, StdoutWriter};

use crate::session::{ResultRow, SearchStatus};
use crate::tags::TaggedFile;
use colored::Colorize;

/// Format one result row
///
/// `quiet` prints the bare path so output can be piped.
#[must_use]
pub fn result_row(row: &ResultRow, selected: bool, quiet: bool) -> String {
    if quiet {
        return row.path.clone();
    }

    let cursor = if selected { ">" } else { " " };
    if row.tagged {
        format!("{cursor} {} {}", "[x]".green(), row.path)
    } else {
        format!("{cursor} [ ] {}", row.path)
    }
}

/// Format a tagged file with its load state
#[must_use]
pub fn tagged_file(file: &TaggedFile, quiet: bool) -> String {
    if quiet {
        return file.path.clone();
    }

    match &file.content {
        None => format!("  {} {}", file.path, "(loading)".dimmed()),
        Some(content) if content.is_unreadable() => {
            format!("  {} {}", file.path, "(unreadable)".red())
        }
        Some(content) => format!("  {} ({} bytes)", file.path, content.as_str().len()),
    }
}

/// Colour a status line by outcome
#[must_use]
pub fn status_line(status: &SearchStatus) -> String {
    let text = status.to_string();
    match status {
        SearchStatus::Failed(_) => text.red().to_string(),
        SearchStatus::NoMatches => text.yellow().to_string(),
        _ => text.dimmed().to_string(),
    }
}
