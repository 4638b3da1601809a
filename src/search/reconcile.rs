//! Merging match results with the tag store
//!
//! A file's tagged status and loaded content belong to the tag store, never
//! to the latest match set. The displayed list is therefore rebuilt from the
//! store first and only then extended with untagged matches.

use super::matcher::MatchSet;
use crate::content::FileContent;
use crate::tags::{TagStore, compare_paths};
use std::collections::HashMap;

/// One row of the displayed result list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayEntry {
    pub path: String,
    pub tagged: bool,
    pub content: Option<FileContent>,
}

/// Output of one reconciliation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// New display list, sorted
    pub entries: Vec<DisplayEntry>,
    /// Untagged matches whose content is not known yet
    pub load_requests: Vec<String>,
}

/// Build the display list for `matches`
///
/// Every tagged file is present whether or not it matched. Content already
/// shown for a path in `previous` is carried over instead of reloaded.
#[must_use]
pub fn reconcile(matches: &MatchSet, store: &TagStore, previous: &[DisplayEntry]) -> Reconciliation {
    let known: HashMap<&str, &FileContent> = previous
        .iter()
        .filter_map(|entry| entry.content.as_ref().map(|c| (entry.path.as_str(), c)))
        .collect();

    let mut entries: Vec<DisplayEntry> = store
        .iter()
        .map(|file| DisplayEntry {
            path: file.path.clone(),
            tagged: true,
            content: file.content.clone(),
        })
        .collect();

    let mut load_requests = Vec::new();
    for path in matches.iter().filter(|path| !store.contains(path)) {
        let content = known.get(path.as_str()).map(|&content| content.clone());
        if content.is_none() {
            load_requests.push(path.clone());
        }
        entries.push(DisplayEntry {
            path: path.clone(),
            tagged: false,
            content,
        });
    }

    entries.sort_by(|a, b| compare_paths(&a.path, &b.path));

    Reconciliation {
        entries,
        load_requests,
    }
}

/// Keep `cursor` if it is valid for `len` rows, else move it to the last row (or zero)
#[must_use]
pub const fn clamp_cursor(cursor: usize, len: usize) -> usize {
    if cursor < len {
        cursor
    } else {
        len.saturating_sub(1)
    }
}
