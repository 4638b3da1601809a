//! Content loading error types

use byte_unit::{Byte, UnitType};
use std::path::PathBuf;
use thiserror::Error;

/// Why a file's content could not be loaded
///
/// These never propagate past the loader: they are rendered into an
/// `Unreadable` placeholder for the path.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The file could not be read
    #[error("{}: {source}", path.display())]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying read failure
        #[source]
        source: std::io::Error,
    },

    /// The file exceeds the configured size limit
    #[error("{} is too large to load ({}, limit {})", path.display(), human_size(*size), human_size(*max))]
    TooLarge {
        /// Oversized file
        path: PathBuf,
        /// Its size in bytes
        size: u64,
        /// Configured limit in bytes
        max: u64,
    },
}

fn human_size(bytes: u64) -> String {
    format!(
        "{:.1}",
        Byte::from_u64(bytes).get_appropriate_unit(UnitType::Binary)
    )
}

/// Result type for content operations
pub type Result<T> = std::result::Result<T, ContentError>;
