//! Tagpick CLI application entry point
//!
//! # Usage
//!
//! ```bash
//! # Interactive session in the current directory (default command)
//! tagpick
//! tagpick session ~/src/project
//!
//! # Print every candidate path
//! tagpick list
//!
//! # One search round, with a tagged file and the composed document
//! tagpick search main --tag README.md --compose --prompt "Explain the entry point"
//!
//! # Quiet mode (only output results)
//! tagpick -q search main
//! ```
//!
//! # Configuration
//!
//! Configuration is stored in the user's config directory
//! (`~/.config/tagpick/config.toml` on Linux) and created with defaults on
//! first run.

use clap::Parser;
use std::path::PathBuf;
use tagpick::{
    TagpickError,
    cli::{Cli, Commands},
    commands::{self, search::SearchOptions},
    config::TagpickConfig,
    logging::{self, ConsoleVerbosity},
    output::{OutputWriter, StdoutWriter},
};
use tokio::io::BufReader;

type Result<T> = std::result::Result<T, TagpickError>;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    let output = StdoutWriter::new();

    if let Err(e) = run(cli, &output).await {
        tracing::error!(error = %e, "exiting with error");
        output.error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: Cli, output: &StdoutWriter) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => TagpickConfig::load_from(path)?,
        None => TagpickConfig::load()?,
    };
    cli.apply_overrides(&mut config);

    logging::init_logging(&config.logging, ConsoleVerbosity::from_flags(cli.verbose, cli.quiet))?;

    let quiet = cli.quiet;
    match cli.command.unwrap_or(Commands::Session { dir: None }) {
        Commands::List { dir } => {
            let base_dir = resolve_dir(dir)?;
            commands::list(&base_dir, &config.listing, output, quiet).await
        }
        Commands::Search {
            query,
            dir,
            tag,
            compose,
            prompt,
        } => {
            let base_dir = resolve_dir(dir)?;
            let options = SearchOptions {
                tags: &tag,
                compose,
                prompt: prompt.as_deref(),
                quiet,
            };
            commands::search(commands::event_loop(&config, base_dir), &query, &options, output).await
        }
        Commands::Session { dir } => {
            let base_dir = resolve_dir(dir)?;
            let stdin = BufReader::new(tokio::io::stdin());
            commands::session(commands::event_loop(&config, base_dir), stdin, output, quiet).await
        }
    }
}

/// Base directory from the command line, else the current directory
fn resolve_dir(dir: Option<PathBuf>) -> Result<PathBuf> {
    let dir = match dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    if !dir.is_dir() {
        return Err(TagpickError::InvalidInput(format!(
            "{} is not a directory",
            dir.display()
        )));
    }
    Ok(dir)
}
