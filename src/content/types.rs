//! Loaded file content

use super::error::ContentError;
use std::fmt;
use std::sync::Arc;

/// Prefix of every unreadable-content placeholder
pub const UNREADABLE_PREFIX: &str = "Error loading content: ";

/// Content of one file as far as the session knows it
///
/// Cloning is cheap; the text is shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    /// Decoded file text (invalid UTF-8 sequences replaced)
    Text(Arc<str>),
    /// Placeholder describing why the file could not be read
    Unreadable(Arc<str>),
}

impl FileContent {
    /// Decode raw bytes
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::Text(String::from_utf8_lossy(bytes).into())
    }

    /// Placeholder for a failed load
    #[must_use]
    pub fn from_error(error: &ContentError) -> Self {
        Self::Unreadable(format!("{UNREADABLE_PREFIX}{error}").into())
    }

    /// The text to show for this file
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(text) | Self::Unreadable(text) => text,
        }
    }

    #[must_use]
    pub const fn is_unreadable(&self) -> bool {
        matches!(self, Self::Unreadable(_))
    }
}

impl fmt::Display for FileContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for FileContent {
    fn from(text: &str) -> Self {
        Self::Text(text.into())
    }
}
