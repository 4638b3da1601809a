//! Command-line interface definitions

use crate::config::{MatcherBackend, TagpickConfig};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Matcher backend selectable on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendArg {
    /// Pipe the listing through the configured filter program
    Process,
    /// Match in-process
    Nucleo,
}

impl From<BackendArg> for MatcherBackend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Process => Self::Process,
            BackendArg::Nucleo => Self::Nucleo,
        }
    }
}

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "tagpick")]
#[command(about = "Fuzzy-find files, tag them, and assemble their contents into a prompt", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Read configuration from this file instead of the default location
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Mirror the log file's level on stderr
    #[arg(short = 'v', long = "verbose", global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Debounce interval in milliseconds (overrides config)
    #[arg(long = "debounce-ms", value_name = "MS", global = true)]
    pub debounce_ms: Option<u64>,

    /// Matcher backend (overrides config)
    #[arg(long = "backend", value_enum, global = true)]
    pub backend: Option<BackendArg>,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded configuration
    pub fn apply_overrides(&self, config: &mut TagpickConfig) {
        if let Some(debounce_ms) = self.debounce_ms {
            config.search.debounce_ms = debounce_ms;
        }
        if let Some(backend) = self.backend {
            config.matcher.backend = backend.into();
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print every candidate path under a directory
    #[command(visible_alias = "ls")]
    List {
        /// Base directory (defaults to the current directory)
        #[arg(value_name = "DIR")]
        dir: Option<PathBuf>,
    },

    /// Run one search round and print the results
    #[command(visible_alias = "s")]
    Search {
        /// Fuzzy query
        #[arg(value_name = "QUERY")]
        query: String,

        /// Base directory (defaults to the current directory)
        #[arg(value_name = "DIR")]
        dir: Option<PathBuf>,

        /// Tag these paths before searching
        #[arg(short = 't', long = "tag", value_name = "PATH", num_args = 1..)]
        tag: Vec<String>,

        /// Print the assembled prompt document after the results
        #[arg(long = "compose")]
        compose: bool,

        /// User request placed at the top of the composed document
        #[arg(short = 'p', long = "prompt", value_name = "TEXT", requires = "compose")]
        prompt: Option<String>,
    },

    /// Interactive session driven by commands on stdin (default)
    Session {
        /// Base directory (defaults to the current directory)
        #[arg(value_name = "DIR")]
        dir: Option<PathBuf>,
    },
}
