//! Configuration module for tagpick
//!
//! Manages application configuration: debounce timing, how candidates are
//! listed, which fuzzy matcher runs, content loading limits and logging.
//! Configuration is stored in the user's config directory and may be
//! overridden per key with `TAGPICK_*` environment variables, using `__`
//! between nested keys (e.g. `TAGPICK_SEARCH__DEBOUNCE_MS=150`).

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Placeholder replaced by the current query in matcher arguments
pub const QUERY_PLACEHOLDER: &str = "{query}";

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct TagpickConfig {
    /// Query debouncing
    #[serde(default)]
    pub search: SearchConfig,

    /// Candidate listing
    #[serde(default)]
    pub listing: ListingConfig,

    /// Fuzzy matcher invocation
    #[serde(default)]
    pub matcher: MatcherConfig,

    /// File content loading
    #[serde(default)]
    pub content: ContentConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Query debouncing settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiet period after the last edit before a search round starts
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { debounce_ms: 300 }
    }
}

impl SearchConfig {
    /// Debounce interval as a `Duration`
    #[must_use]
    pub const fn debounce_interval(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Candidate listing settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ListingConfig {
    /// Use `git ls-files` when the base directory is inside a work tree
    pub use_vcs: bool,

    /// Depth bound for the fallback directory walk
    pub max_depth: u32,

    /// Custom listing command (program followed by arguments), run in the base directory
    pub command: Option<Vec<String>>,

    /// Exit status of the custom command that means "nothing found"
    pub no_match_status: Option<i32>,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            use_vcs: true,
            max_depth: 100,
            command: None,
            no_match_status: None,
        }
    }
}

/// Which matcher implementation runs a search round
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MatcherBackend {
    /// Pipe the listing into an external filter process
    #[default]
    Process,
    /// Match in-process with nucleo
    Nucleo,
}

/// Fuzzy matcher settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct MatcherConfig {
    /// Matcher implementation
    pub backend: MatcherBackend,

    /// Filter program
    pub program: String,

    /// Filter arguments; `{query}` is replaced by the current query
    pub args: Vec<String>,

    /// Filter exit status that means "no matches"
    pub no_match_status: i32,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            backend: MatcherBackend::Process,
            program: "fzf".to_string(),
            args: vec![
                "--filter".to_string(),
                QUERY_PLACEHOLDER.to_string(),
                "--print0".to_string(),
            ],
            no_match_status: 1,
        }
    }
}

impl MatcherConfig {
    /// Filter arguments with the query substituted in
    #[must_use]
    pub fn args_for(&self, query: &str) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| arg.replace(QUERY_PLACEHOLDER, query))
            .collect()
    }
}

/// Content loading settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ContentConfig {
    /// Files larger than this are not read; a placeholder is recorded instead
    pub max_file_size: u64,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            max_file_size: 5_242_880, // 5MB
        }
    }
}

/// Logging settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,

    /// Log file; defaults to `tagpick.log` in the user's data directory
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "tagpick=info".to_string(),
            file: None,
        }
    }
}

impl TagpickConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("tagpick").join("config.toml"))
    }

    /// Load configuration from the default location, creating it if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let default_config = Self::default();
            default_config.save_to(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit file, layered with environment overrides
    ///
    /// A missing file is not an error; defaults apply.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file or an environment override cannot be parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(
                File::from(path.to_path_buf())
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix("TAGPICK")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the parent directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }
}
