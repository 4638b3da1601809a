//! Assembling the harvest document
//!
//! The document is plain Markdown: the user's request first, then every
//! tagged file in a fenced block under its own heading.

use super::NOT_LOADED;
use crate::tags::{TagSnapshot, TaggedFile};
use std::fmt::Write;

/// Prompt editor plus the tagged files it will be combined with
#[derive(Debug, Clone, Default)]
pub struct ComposeView {
    prompt: String,
    snapshot: TagSnapshot,
    output: Option<String>,
}

impl ComposeView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    #[must_use]
    pub fn files(&self) -> &[TaggedFile] {
        &self.snapshot.files
    }

    /// Replace the tagged files unless `snapshot` is older than the current one
    ///
    /// A document that is currently shown is regenerated.
    pub fn apply(&mut self, snapshot: &TagSnapshot) -> bool {
        if !snapshot.supersedes(self.snapshot.revision) {
            return false;
        }

        self.snapshot = snapshot.clone();
        if self.output.is_some() {
            tracing::debug!(revision = snapshot.revision, "regenerating composed document");
            self.generate();
        }
        true
    }

    /// Build the document and keep it shown
    pub fn generate(&mut self) -> &str {
        let document = assemble(&self.prompt, &self.snapshot.files);
        tracing::debug!(
            files = self.snapshot.files.len(),
            length = document.len(),
            "composed document"
        );
        self.output.insert(document)
    }

    /// The document while it is shown
    #[must_use]
    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    /// Go back to editing
    pub fn hide_output(&mut self) {
        self.output = None;
    }
}

/// Combine a prompt and tagged files into one Markdown document
#[must_use]
pub fn assemble(prompt: &str, files: &[TaggedFile]) -> String {
    let mut document = String::new();

    let prompt = prompt.trim();
    if !prompt.is_empty() {
        document.push_str("## User Request\n\n");
        document.push_str(prompt);
        document.push_str("\n\n");
    }

    if !files.is_empty() {
        document.push_str("## Relevant Files\n\n");
        for file in files {
            let content = file
                .content
                .as_ref()
                .map_or(NOT_LOADED, |content| content.as_str());

            let _ = write!(document, "### {}\n\n```\n{content}", file.path);
            if !content.ends_with('\n') {
                document.push('\n');
            }
            document.push_str("```\n\n");
        }
    }

    document
}
