//! Tagpick - incremental fuzzy file search with a persistent tag set
//!
//! Type a query, get fuzzy matches over the files under a base directory,
//! tag the ones you want. Tagged files stay visible whatever the query, and
//! their contents can be assembled into a single prompt document.

use thiserror::Error;

pub mod cli;
pub mod commands;
pub mod config;
pub mod content;
pub mod logging;
pub mod output;
pub mod search;
pub mod session;
pub mod tags;
pub mod views;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum TagpickError {
    /// Search error
    #[error("Search error: {0}")]
    Search(#[from] search::SearchError),
    /// A search round ended in failure
    #[error("Search failed: {0}")]
    SearchFailed(String),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    /// Logging could not be set up
    #[error("Logging error: {0}")]
    Logging(#[from] logging::LoggingError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
