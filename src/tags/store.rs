//! Tag store

use crate::content::FileContent;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Display order for paths: case-insensitive, ties broken by exact bytes
#[must_use]
pub fn compare_paths(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| a.cmp(b))
}

/// A file the user has tagged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedFile {
    /// Path relative to the base directory
    pub path: String,
    /// Loaded content, absent until the loader delivers it
    pub content: Option<FileContent>,
}

impl TaggedFile {
    #[must_use]
    pub fn new(path: impl Into<String>, content: Option<FileContent>) -> Self {
        Self {
            path: path.into(),
            content,
        }
    }

    /// Always true; membership in the store is what tagging means
    #[must_use]
    pub const fn tagged(&self) -> bool {
        true
    }
}

/// Result of a toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The file is now tagged; `needs_load` when its content is still unknown
    Tagged {
        /// Caller should schedule a content load
        needs_load: bool,
    },
    /// The file is no longer tagged
    Untagged,
}

/// Path-keyed set of tagged files
///
/// Never rebuilt wholesale: entries change only through explicit tag and
/// untag operations and content back-fill.
#[derive(Debug, Clone, Default)]
pub struct TagStore {
    files: HashMap<String, TaggedFile>,
}

impl TagStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&TaggedFile> {
        self.files.get(path)
    }

    /// Iterate entries in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = &TaggedFile> {
        self.files.values()
    }

    /// Flip the tagged state of `path`
    ///
    /// Tagging records `current_content` if it is already known.
    pub fn toggle(&mut self, path: &str, current_content: Option<FileContent>) -> ToggleOutcome {
        if self.untag(path) {
            ToggleOutcome::Untagged
        } else {
            let needs_load = current_content.is_none();
            self.tag(path, current_content);
            ToggleOutcome::Tagged { needs_load }
        }
    }

    /// Tag `path`; returns `false` if it was already tagged
    ///
    /// An existing entry keeps its content unless it had none yet.
    pub fn tag(&mut self, path: &str, content: Option<FileContent>) -> bool {
        if let Some(existing) = self.files.get_mut(path) {
            if existing.content.is_none() {
                existing.content = content;
            }
            return false;
        }

        tracing::debug!(path, "tagged");
        self.files
            .insert(path.to_string(), TaggedFile::new(path, content));
        true
    }

    /// Untag `path`; returns `false` if it was not tagged
    pub fn untag(&mut self, path: &str) -> bool {
        let removed = self.files.remove(path).is_some();
        if removed {
            tracing::debug!(path, "untagged");
        }
        removed
    }

    /// Fill in content delivered by the loader
    ///
    /// Returns `true` if an entry without content was updated. Loads that
    /// arrive after the file was untagged, or for content already known,
    /// are ignored.
    pub fn backfill(&mut self, path: &str, content: &FileContent) -> bool {
        match self.files.get_mut(path) {
            Some(entry) if entry.content.is_none() => {
                entry.content = Some(content.clone());
                true
            }
            _ => false,
        }
    }

    /// All entries in display order
    #[must_use]
    pub fn snapshot(&self) -> Vec<TaggedFile> {
        let mut files: Vec<TaggedFile> = self.files.values().cloned().collect();
        files.sort_by(|a, b| compare_paths(&a.path, &b.path));
        files
    }
}
