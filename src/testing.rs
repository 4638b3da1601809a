//! Testing utilities for tagpick
//!
//! This module provides helper types and functions for writing tests:
//! RAII temporary files, throwaway git work trees, stand-in listing and
//! filter commands built on `sh`, a counting content source and a scripted
//! matcher.
//!
//! Only available when compiled with `cfg(test)`.

use crate::config::MatcherConfig;
use crate::content::ContentSource;
use crate::search::candidates::ListingCommand;
use crate::search::error::{Result as SearchResult, SearchError};
use crate::search::{FuzzyMatcher, MatchSet};
use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::{Arc, Mutex};

/// Create a test file with custom content, creating parent directories
///
/// # Errors
/// Returns an `io::Error` if the file cannot be created or written.
pub fn create_test_file_with_content(path: impl AsRef<Path>, content: &[u8]) -> io::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::File::create(path)?;
    file.write_all(content)?;
    Ok(())
}

/// RAII guard for temporary test files
///
/// Automatically removes the file when dropped, ensuring test cleanup.
pub struct TempFile {
    path: PathBuf,
    temp_dir: Option<PathBuf>,
}

impl TempFile {
    /// Create a new temporary file with default content
    ///
    /// Creates the file in a unique temporary directory to avoid collisions between parallel tests.
    ///
    /// # Errors
    /// Returns an `io::Error` if the file cannot be created.
    pub fn create(filename: impl AsRef<Path>) -> io::Result<Self> {
        Self::create_with_content(filename, b"test content")
    }

    /// Create a new temporary file with custom content
    ///
    /// # Errors
    /// Returns an `io::Error` if the file cannot be created.
    pub fn create_with_content(filename: impl AsRef<Path>, content: &[u8]) -> io::Result<Self> {
        use std::time::{SystemTime, UNIX_EPOCH};

        // Create unique temp dir using timestamp + thread id
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let thread_id = std::thread::current().id();
        let temp_dir = std::env::temp_dir().join(format!("tagpick_test_{timestamp}_{thread_id:?}"));
        fs::create_dir_all(&temp_dir)?;

        let path = temp_dir.join(filename.as_ref());
        create_test_file_with_content(&path, content)?;
        Ok(Self { path, temp_dir: Some(temp_dir) })
    }

    /// Get the path to the temporary file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        // Best effort cleanup - ignore errors
        let _ = fs::remove_file(&self.path);
        if let Some(ref temp_dir) = self.temp_dir {
            let _ = fs::remove_dir_all(temp_dir);
        }
    }
}

/// Whether `program` can be started on this machine
#[must_use]
pub fn command_available(program: &str) -> bool {
    Command::new(program)
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok()
}

fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args(["-c", "user.name=tagpick", "-c", "user.email=tagpick@example.com"])
        .args(args)
        .current_dir(dir)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .expect("Failed to run git");
    assert!(status.success(), "git {args:?} failed");
}

/// A temporary git work tree with `files` written and staged
///
/// Each file's content is its own path followed by a newline.
///
/// # Panics
/// Panics if the directory cannot be created or git fails.
#[must_use]
pub fn git_repo_with_files(files: &[&str]) -> tempfile::TempDir {
    let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    git(dir.path(), &["init", "-q"]);

    for file in files {
        create_test_file_with_content(dir.path().join(file), format!("{file}\n").as_bytes())
            .expect("Failed to write repo file");
    }
    git(dir.path(), &["add", "."]);
    dir
}

/// A listing that prints `paths`, one per line, in `dir`
#[must_use]
pub fn fixed_listing(dir: &Path, paths: &[&str]) -> ListingCommand {
    let mut argv = vec!["printf".to_string(), "%s\\n".to_string()];
    argv.extend(paths.iter().map(ToString::to_string));
    ListingCommand::custom(&argv, dir, None).expect("non-empty argv")
}

/// A filter that keeps lines containing the query, NUL-delimited, exit 1 on no match
#[must_use]
pub fn fake_filter() -> MatcherConfig {
    MatcherConfig {
        program: "sh".to_string(),
        args: vec![
            "-c".to_string(),
            r#"out=$(grep -F -- "$1") || exit 1; printf '%s' "$out" | tr '\n' '\0'"#.to_string(),
            "sh".to_string(),
            crate::config::QUERY_PLACEHOLDER.to_string(),
        ],
        ..MatcherConfig::default()
    }
}

/// In-memory content source that counts reads per path
#[derive(Clone, Default)]
pub struct CountingSource {
    files: Arc<HashMap<PathBuf, Vec<u8>>>,
    reads: Arc<Mutex<HashMap<PathBuf, usize>>>,
}

impl CountingSource {
    /// Source serving `files` as `(path, content)` pairs
    #[must_use]
    pub fn with_files(files: &[(&str, &str)]) -> Self {
        let files = files
            .iter()
            .map(|(path, content)| (PathBuf::from(path), content.as_bytes().to_vec()))
            .collect();
        Self {
            files: Arc::new(files),
            reads: Arc::default(),
        }
    }

    /// How many times `path` was read
    #[must_use]
    pub fn reads(&self, path: &str) -> usize {
        self.reads
            .lock()
            .unwrap()
            .get(Path::new(path))
            .copied()
            .unwrap_or(0)
    }
}

impl ContentSource for CountingSource {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        *self.reads.lock().unwrap().entry(path.to_path_buf()).or_default() += 1;
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "No such file or directory"))
    }
}

/// Matcher answering from a fixed table; unknown queries match nothing
#[derive(Clone, Default)]
pub struct ScriptedMatcher {
    responses: Arc<HashMap<String, Option<MatchSet>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedMatcher {
    /// Build from `(query, Some(paths))` answers; `None` makes the query fail
    #[must_use]
    pub fn new(responses: &[(&str, Option<&[&str]>)]) -> Self {
        let responses = responses
            .iter()
            .map(|(query, paths)| {
                let set: Option<MatchSet> = paths.map(|paths| paths.iter().map(ToString::to_string).collect());
                ((*query).to_string(), set)
            })
            .collect();
        Self {
            responses: Arc::new(responses),
            calls: Arc::default(),
        }
    }

    /// Queries invoked so far, in order
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl FuzzyMatcher for ScriptedMatcher {
    async fn invoke(&self, query: &str, _base_dir: &Path) -> SearchResult<MatchSet> {
        self.calls.lock().unwrap().push(query.to_string());
        tokio::task::yield_now().await;

        match self.responses.get(query) {
            Some(Some(set)) => Ok(set.clone()),
            Some(None) => Err(SearchError::Provider(format!("scripted failure for '{query}'"))),
            None => Ok(MatchSet::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_file_with_nested_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("file.txt");
        create_test_file_with_content(&path, b"custom test data").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"custom test data");
    }

    #[test]
    fn test_temp_file_auto_cleanup() {
        let path = {
            let temp = TempFile::create("test_temp_file_cleanup.txt").unwrap();
            assert!(temp.path().exists());
            temp.path().to_path_buf()
        };

        assert!(!path.exists());
    }

    #[test]
    fn test_multiple_temp_files() {
        let temp1 = TempFile::create("test_temp_1.txt").unwrap();
        let temp2 = TempFile::create_with_content("test_temp_2.txt", b"two").unwrap();

        assert!(temp1.path().exists());
        assert_eq!(fs::read(temp2.path()).unwrap(), b"two");
    }

    #[test]
    fn test_counting_source_counts_misses_too() {
        let source = CountingSource::with_files(&[("a.go", "a")]);
        assert_eq!(source.read(Path::new("a.go")).unwrap(), b"a");
        assert!(source.read(Path::new("b.go")).is_err());

        assert_eq!(source.reads("a.go"), 1);
        assert_eq!(source.reads("b.go"), 1);
        assert_eq!(source.reads("c.go"), 0);
    }

    #[tokio::test]
    async fn test_scripted_matcher_records_calls() {
        let matcher = ScriptedMatcher::new(&[("go", Some(&["a.go"][..])), ("bad", None)]);

        let found = matcher.invoke("go", Path::new(".")).await.unwrap();
        assert!(found.contains("a.go"));
        assert!(matcher.invoke("bad", Path::new(".")).await.is_err());
        assert!(matcher.invoke("other", Path::new(".")).await.unwrap().is_empty());
        assert_eq!(matcher.calls(), vec!["go", "bad", "other"]);
    }
}
