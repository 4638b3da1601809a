//! Browsing the tagged files

use super::NOT_LOADED;
use crate::search::clamp_cursor;
use crate::tags::{TagSnapshot, TaggedFile};

/// Tagged-file list with a cursor and an optional preview
#[derive(Debug, Clone, Default)]
pub struct BrowseView {
    snapshot: TagSnapshot,
    cursor: usize,
    show_preview: bool,
}

impl BrowseView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the file list with `snapshot` unless it is older than the current one
    ///
    /// Returns `true` if the snapshot was applied. Applying closes the preview.
    pub fn apply(&mut self, snapshot: &TagSnapshot) -> bool {
        if !snapshot.supersedes(self.snapshot.revision) {
            tracing::trace!(
                held = self.snapshot.revision,
                received = snapshot.revision,
                "browse view ignoring stale snapshot"
            );
            return false;
        }

        self.snapshot = snapshot.clone();
        self.cursor = clamp_cursor(self.cursor, self.snapshot.files.len());
        self.show_preview = false;
        true
    }

    #[must_use]
    pub fn files(&self) -> &[TaggedFile] {
        &self.snapshot.files
    }

    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.snapshot.revision
    }

    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn selected(&self) -> Option<&TaggedFile> {
        self.snapshot.files.get(self.cursor)
    }

    /// Move down, wrapping to the top
    pub fn next(&mut self) {
        let len = self.snapshot.files.len();
        if len > 0 {
            self.cursor = (self.cursor + 1) % len;
        }
    }

    /// Move up, wrapping to the bottom
    pub fn previous(&mut self) {
        let len = self.snapshot.files.len();
        if len > 0 {
            self.cursor = (self.cursor + len - 1) % len;
        }
    }

    pub fn toggle_preview(&mut self) {
        self.show_preview = !self.show_preview && self.selected().is_some();
    }

    pub fn close_preview(&mut self) {
        self.show_preview = false;
    }

    /// Content of the selected file while the preview is open
    #[must_use]
    pub fn preview(&self) -> Option<&str> {
        if !self.show_preview {
            return None;
        }
        self.selected().map(|file| {
            file.content
                .as_ref()
                .map_or(NOT_LOADED, |content| content.as_str())
        })
    }

    /// Path the session should untag, if a file is selected
    ///
    /// The list itself is left alone until the next snapshot arrives.
    pub fn untag_selected(&mut self) -> Option<String> {
        let path = self.selected()?.path.clone();
        self.show_preview = false;
        Some(path)
    }
}
