//! Logging setup
//!
//! Everything at the configured level goes to a log file that is truncated
//! at start-up. Standard error only carries warnings (errors with `--quiet`),
//! or the full configured level with `--verbose`. `RUST_LOG` overrides the
//! configured level for both.

use crate::config::LoggingConfig;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Logging initialisation failures
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The log file could not be created
    #[error("Failed to open log file {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configured level is not a valid filter directive
    #[error("Invalid log level '{directive}': {source}")]
    Filter {
        directive: String,
        #[source]
        source: ParseError,
    },

    /// A global subscriber was already installed
    #[error("Failed to install log subscriber: {0}")]
    Init(#[from] TryInitError),
}

/// How much goes to standard error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleVerbosity {
    /// Errors only
    Quiet,
    /// Warnings and errors
    #[default]
    Normal,
    /// Same as the log file
    Verbose,
}

impl ConsoleVerbosity {
    #[must_use]
    pub const fn from_flags(verbose: bool, quiet: bool) -> Self {
        if verbose {
            Self::Verbose
        } else if quiet {
            Self::Quiet
        } else {
            Self::Normal
        }
    }
}

/// Where the log file goes: the configured path, else the user's data directory
#[must_use]
pub fn log_file_path(config: &LoggingConfig) -> Option<PathBuf> {
    config.file.clone().or_else(|| {
        dirs::data_local_dir().map(|dir| dir.join("tagpick").join("tagpick.log"))
    })
}

/// Filter from `RUST_LOG`, falling back to `level`
///
/// # Errors
///
/// Returns `LoggingError::Filter` if `level` is not a valid directive.
pub fn build_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(level).map_err(|source| LoggingError::Filter {
        directive: level.to_string(),
        source,
    })
}

fn open_log_file(path: &Path) -> Result<File, LoggingError> {
    let to_error = |source| LoggingError::File {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(to_error)?;
    }
    File::create(path).map_err(to_error)
}

/// Install the global subscriber; returns the log file path, if any
///
/// # Errors
///
/// Returns a `LoggingError` if the log file cannot be created, the level is
/// invalid, or a subscriber is already installed.
pub fn init_logging(
    config: &LoggingConfig,
    console: ConsoleVerbosity,
) -> Result<Option<PathBuf>, LoggingError> {
    let log_path = log_file_path(config);

    let file_layer = match &log_path {
        Some(path) => {
            let file = open_log_file(path)?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_filter(build_filter(&config.level)?),
            )
        }
        None => None,
    };

    let console_filter = match console {
        ConsoleVerbosity::Verbose => build_filter(&config.level)?,
        ConsoleVerbosity::Normal => EnvFilter::new("warn"),
        ConsoleVerbosity::Quiet => EnvFilter::new("error"),
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(console_filter),
        )
        .try_init()?;

    tracing::debug!(log_file = ?log_path, "logging initialised");
    Ok(log_path)
}
