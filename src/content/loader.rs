//! Cached content loader

use super::error::ContentError;
use super::types::FileContent;
use moka::sync::Cache;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where file bytes come from
pub trait ContentSource: Send + Sync + 'static {
    /// Read the whole file
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// File size, when it can be known without reading
    fn size(&self, _path: &Path) -> Option<u64> {
        None
    }
}

/// Reads from the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSource;

impl ContentSource for FsSource {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn size(&self, path: &Path) -> Option<u64> {
        fs::metadata(path).ok().map(|metadata| metadata.len())
    }
}

/// Loads file content relative to a base directory and caches it for the session
///
/// The cache has no capacity or expiry bounds: once a path has produced
/// content (or a placeholder) it is never read again. Concurrent loads of one
/// path are coalesced into a single read.
#[derive(Clone)]
pub struct ContentLoader {
    source: Arc<dyn ContentSource>,
    base_dir: Arc<Path>,
    max_file_size: u64,
    cache: Cache<String, FileContent>,
}

impl ContentLoader {
    /// Create a loader over an arbitrary source
    #[must_use]
    pub fn new(source: impl ContentSource, base_dir: impl Into<PathBuf>, max_file_size: u64) -> Self {
        let base_dir: PathBuf = base_dir.into();
        Self {
            source: Arc::new(source),
            base_dir: Arc::from(base_dir),
            max_file_size,
            cache: Cache::builder().build(),
        }
    }

    /// Create a loader reading from disk
    #[must_use]
    pub fn from_fs(base_dir: impl Into<PathBuf>, max_file_size: u64) -> Self {
        Self::new(FsSource, base_dir, max_file_size)
    }

    /// Directory that relative paths are resolved against
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Content for `path`, reading it on first request
    ///
    /// Blocks on I/O; use [`Self::load_async`] from async code.
    #[must_use]
    pub fn load(&self, path: &str) -> FileContent {
        self.cache
            .get_with(path.to_string(), || self.read_uncached(path))
    }

    /// Content for `path`, read on the blocking pool
    pub async fn load_async(&self, path: String) -> FileContent {
        let loader = self.clone();
        let task_path = path.clone();

        match tokio::task::spawn_blocking(move || loader.load(&task_path)).await {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(path, error = %e, "content load task failed");
                FileContent::Unreadable(format!("{}{e}", super::types::UNREADABLE_PREFIX).into())
            }
        }
    }

    /// Content already loaded for `path`
    #[must_use]
    pub fn cached(&self, path: &str) -> Option<FileContent> {
        self.cache.get(path)
    }

    /// Number of paths loaded so far
    #[must_use]
    pub fn cached_count(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    fn read_uncached(&self, path: &str) -> FileContent {
        let full_path = self.base_dir.join(path);

        match self.read_checked(&full_path) {
            Ok(bytes) => {
                tracing::debug!(path, bytes = bytes.len(), "loaded content");
                FileContent::from_bytes(&bytes)
            }
            Err(e) => {
                tracing::warn!(path, error = %e, "failed to load content");
                FileContent::from_error(&e)
            }
        }
    }

    fn read_checked(&self, full_path: &Path) -> Result<Vec<u8>, ContentError> {
        let too_large = |size: u64| ContentError::TooLarge {
            path: full_path.to_path_buf(),
            size,
            max: self.max_file_size,
        };

        if let Some(size) = self.source.size(full_path) {
            if size > self.max_file_size {
                return Err(too_large(size));
            }
        }

        let bytes = self.source.read(full_path).map_err(|source| ContentError::Io {
            path: full_path.to_path_buf(),
            source,
        })?;

        let size = bytes.len() as u64;
        if size > self.max_file_size {
            return Err(too_large(size));
        }
        Ok(bytes)
    }
}

impl std::fmt::Debug for ContentLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentLoader")
            .field("base_dir", &self.base_dir)
            .field("max_file_size", &self.max_file_size)
            .finish_non_exhaustive()
    }
}
