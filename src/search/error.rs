//! Search-specific error types
//!
//! This module defines the failures of one search round: listing the
//! candidate set, running the fuzzy filter, or handing the listing's output
//! across to the filter. Every variant is round-scoped: the session turns it
//! into a status message and leaves the tag store untouched.
//!
//! # Error Types
//!
//! - **`Provider`**: The candidate listing could not be produced
//! - **`MatcherSpawn`**: The filter process could not be started
//! - **`MatcherExit`**: The filter or the lister exited with an unexpected status
//! - **`Pipe`**: The inter-process stream could not be set up
//! - **`Malformed`**: A record in process output did not have the expected shape
//! - **`Worker`**: A background matching worker panicked or was cancelled
//!
//! A filter that finds nothing is not an error: it yields an empty match set.

use std::fmt;
use thiserror::Error;

/// Search-specific errors
#[derive(Debug, Error)]
pub enum SearchError {
    /// Candidate listing failed (neither VCS listing nor the fallback walk worked)
    #[error("Candidate listing failed: {0}")]
    Provider(String),

    /// The fuzzy filter process could not be started
    #[error("Failed to start matcher '{program}': {source}")]
    MatcherSpawn {
        /// Program that was being started
        program: String,
        /// Underlying spawn failure
        #[source]
        source: std::io::Error,
    },

    /// One of the pipeline processes exited with an unexpected status
    #[error("Fuzzy search failed: {filter}; {lister}")]
    MatcherExit {
        /// Outcome of the filter process
        filter: ProcessReport,
        /// Outcome of the listing process
        lister: ProcessReport,
    },

    /// The listing output could not be connected to the filter input
    #[error("Failed to connect listing to matcher: {0}")]
    Pipe(String),

    /// A record in process output was malformed
    #[error("Malformed process output: {0}")]
    Malformed(String),

    /// A background matching worker failed
    #[error("Matcher worker failed: {0}")]
    Worker(String),
}

/// Exit status and diagnostics of one pipeline process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessReport {
    /// Program name
    pub program: String,
    /// Exit code, `None` when terminated by a signal
    pub code: Option<i32>,
    /// Captured standard error, trimmed
    pub stderr: String,
}

impl ProcessReport {
    /// Build a report from a finished process
    #[must_use]
    pub fn new(program: impl Into<String>, code: Option<i32>, stderr: &[u8]) -> Self {
        Self {
            program: program.into(),
            code,
            stderr: String::from_utf8_lossy(stderr).trim().to_string(),
        }
    }
}

impl fmt::Display for ProcessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "{} exited with status {code}", self.program)?,
            None => write!(f, "{} was terminated by a signal", self.program)?,
        }
        if !self.stderr.is_empty() {
            write!(f, " (stderr: {})", self.stderr)?;
        }
        Ok(())
    }
}

/// Result type for search operations
pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
