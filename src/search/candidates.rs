//! Candidate list provider
//!
//! Produces the full searchable path set for a base directory. Inside a git
//! work tree the tracked-file listing is used (fast, honours ignore rules,
//! never descends into `.git`); anywhere else a depth-bounded ripgrep walk
//! that includes hidden entries and ignores ignore-files takes over. A custom
//! listing command from the configuration replaces both.

use super::error::{ProcessReport, Result, SearchError};
use super::wire;
use crate::config::ListingConfig;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

/// How a listing was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingStrategy {
    /// Tracked files of a version-controlled work tree
    Vcs,
    /// Recursive directory walk
    Walk,
    /// User-configured command
    Custom,
}

/// A fully resolved listing process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingCommand {
    /// Program to run
    pub program: String,
    /// Arguments
    pub args: Vec<String>,
    /// Working directory; listed paths are relative to it
    pub current_dir: PathBuf,
    /// Exit status meaning "nothing found", treated as success
    pub no_match_status: Option<i32>,
    /// Which strategy produced this command
    pub strategy: ListingStrategy,
}

impl ListingCommand {
    /// `git ls-files` in `base_dir`
    #[must_use]
    pub fn git(base_dir: &Path) -> Self {
        Self {
            program: "git".to_string(),
            args: vec![
                "-c".to_string(),
                "core.quotePath=false".to_string(),
                "ls-files".to_string(),
            ],
            current_dir: base_dir.to_path_buf(),
            no_match_status: None,
            strategy: ListingStrategy::Vcs,
        }
    }

    /// Depth-bounded `rg --files` walk of `base_dir`, hidden entries included
    #[must_use]
    pub fn walk(base_dir: &Path, max_depth: u32) -> Self {
        Self {
            program: "rg".to_string(),
            args: vec![
                "--files".to_string(),
                "--hidden".to_string(),
                "--no-ignore".to_string(),
                "--max-depth".to_string(),
                max_depth.to_string(),
            ],
            current_dir: base_dir.to_path_buf(),
            // rg exits 1 when it finds no files
            no_match_status: Some(1),
            strategy: ListingStrategy::Walk,
        }
    }

    /// A user-supplied argv run in `base_dir`
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Provider` if `argv` is empty.
    pub fn custom(argv: &[String], base_dir: &Path, no_match_status: Option<i32>) -> Result<Self> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| SearchError::Provider("custom listing command is empty".to_string()))?;

        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
            current_dir: base_dir.to_path_buf(),
            no_match_status,
            strategy: ListingStrategy::Custom,
        })
    }

    /// Build the process command; stdio is left to the caller
    #[must_use]
    pub fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args).current_dir(&self.current_dir);
        command
    }

    /// Whether an exit code counts as a successful listing
    #[must_use]
    pub fn accepts(&self, code: Option<i32>) -> bool {
        code == Some(0) || (code.is_some() && code == self.no_match_status)
    }

    /// Human-readable command line for logs and errors
    #[must_use]
    pub fn describe(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Probe whether `base_dir` is inside a git work tree
///
/// Any failure (git missing, not a repository) reads as "no".
pub async fn is_inside_work_tree(base_dir: &Path) -> bool {
    let output = Command::new("git")
        .arg("-C")
        .arg(base_dir)
        .args(["rev-parse", "--is-inside-work-tree"])
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .await;

    match output {
        Ok(output) if output.status.success() => {
            wire::parse_work_tree_probe(&output.stdout).unwrap_or_else(|e| {
                tracing::debug!(error = %e, "ignoring unreadable work-tree probe");
                false
            })
        }
        Ok(_) => false,
        Err(e) => {
            tracing::debug!(error = %e, "git unavailable for work-tree probe");
            false
        }
    }
}

/// Pick the listing command for `base_dir`
///
/// # Errors
///
/// Returns `SearchError::Provider` if a configured custom command is empty.
pub async fn resolve_listing(base_dir: &Path, config: &ListingConfig) -> Result<ListingCommand> {
    if let Some(argv) = &config.command {
        return ListingCommand::custom(argv, base_dir, config.no_match_status);
    }

    if config.use_vcs && is_inside_work_tree(base_dir).await {
        tracing::debug!(base_dir = %base_dir.display(), "listing tracked files with git");
        return Ok(ListingCommand::git(base_dir));
    }

    tracing::debug!(base_dir = %base_dir.display(), "listing files with a directory walk");
    Ok(ListingCommand::walk(base_dir, config.max_depth))
}

/// Run a listing to completion and parse its newline-delimited output
///
/// # Errors
///
/// Returns `SearchError::Provider` if the process cannot start or exits with an
/// unexpected status, `SearchError::Malformed` for non-UTF-8 output.
pub async fn run_listing(listing: &ListingCommand) -> Result<Vec<String>> {
    let output = listing
        .to_command()
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|e| SearchError::Provider(format!("failed to run '{}': {e}", listing.describe())))?;

    if !listing.accepts(output.status.code()) {
        let report = ProcessReport::new(&listing.program, output.status.code(), &output.stderr);
        return Err(SearchError::Provider(report.to_string()));
    }

    wire::parse_lines(&output.stdout)
}

/// List every candidate path under `base_dir`
///
/// # Errors
///
/// Returns a `SearchError` if no listing mechanism works for this directory.
pub async fn list_candidates(base_dir: &Path, config: &ListingConfig) -> Result<Vec<String>> {
    let listing = resolve_listing(base_dir, config).await?;
    let paths = run_listing(&listing).await?;
    tracing::debug!(count = paths.len(), command = %listing.describe(), "listed candidates");
    Ok(paths)
}
