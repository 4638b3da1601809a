//! Fuzzy matcher invocation
//!
//! A search round lists the candidate set and filters it against the query.
//! The default backend does both with external processes: the listing's
//! standard output is handed straight to the filter's standard input, so
//! the candidate list is streamed rather than buffered in this process.
//! The filter writes NUL-delimited matches.
//!
//! Exit-code convention: the filter's reserved "no matches" status yields an
//! empty match set. Any other failure of either process becomes a single
//! `SearchError::MatcherExit` carrying both processes' diagnostics.

use super::candidates::{self, ListingCommand};
use super::error::{ProcessReport, Result, SearchError};
use super::wire;
use crate::config::{ListingConfig, MatcherBackend, MatcherConfig, TagpickConfig};
use std::collections::BTreeSet;
use std::future::Future;
use std::path::Path;
use std::process::Stdio;
use tokio::process::{Child, Command};

/// Paths returned by one matcher invocation
pub type MatchSet = BTreeSet<String>;

/// A fuzzy matching backend
///
/// Invocations run as independent tasks; implementations must not touch
/// session state.
pub trait FuzzyMatcher: Send + Sync + 'static {
    /// Match `query` against the candidates under `base_dir`
    ///
    /// An empty result is a success, not an error.
    fn invoke(&self, query: &str, base_dir: &Path) -> impl Future<Output = Result<MatchSet>> + Send;
}

/// Streams the candidate listing through an external filter process
#[derive(Debug, Clone)]
pub struct ProcessMatcher {
    listing: ListingConfig,
    filter: MatcherConfig,
}

impl ProcessMatcher {
    /// Create a process matcher
    #[must_use]
    pub const fn new(listing: ListingConfig, filter: MatcherConfig) -> Self {
        Self { listing, filter }
    }
}

impl FuzzyMatcher for ProcessMatcher {
    async fn invoke(&self, query: &str, base_dir: &Path) -> Result<MatchSet> {
        let listing = candidates::resolve_listing(base_dir, &self.listing).await?;
        run_pipeline(&listing, &self.filter, query).await
    }
}

/// Kill and reap a child that will not be awaited normally
async fn reap(child: &mut Child) {
    let _ = child.start_kill();
    let _ = child.wait().await;
}

/// Run `listing | filter` and parse the filter's NUL-delimited output
///
/// Both processes are started before either is awaited.
///
/// # Errors
///
/// - `SearchError::Provider` if the listing cannot be started
/// - `SearchError::Pipe` if its output cannot be connected to the filter
/// - `SearchError::MatcherSpawn` if the filter cannot be started
/// - `SearchError::MatcherExit` if either process exits unexpectedly
/// - `SearchError::Malformed` if the filter output is not UTF-8
pub async fn run_pipeline(
    listing: &ListingCommand,
    filter: &MatcherConfig,
    query: &str,
) -> Result<MatchSet> {
    let mut lister = listing
        .to_command()
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| SearchError::Provider(format!("failed to start '{}': {e}", listing.describe())))?;

    let Some(lister_stdout) = lister.stdout.take() else {
        reap(&mut lister).await;
        return Err(SearchError::Pipe("listing stdout was not captured".to_string()));
    };

    let filter_stdin: Stdio = match lister_stdout.try_into() {
        Ok(stdio) => stdio,
        Err(e) => {
            reap(&mut lister).await;
            return Err(SearchError::Pipe(e.to_string()));
        }
    };

    let mut filter_command = Command::new(&filter.program);
    filter_command
        .args(filter.args_for(query))
        .current_dir(&listing.current_dir)
        .stdin(filter_stdin)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    let spawned = filter_command.spawn();
    // The command still owns this process's copy of the pipe's read end.
    drop(filter_command);

    let filter_child = match spawned {
        Ok(child) => child,
        Err(source) => {
            reap(&mut lister).await;
            return Err(SearchError::MatcherSpawn {
                program: filter.program.clone(),
                source,
            });
        }
    };

    tracing::debug!(
        query,
        listing = %listing.describe(),
        filter = %filter.program,
        "started search pipeline"
    );

    let (filter_output, lister_output) =
        tokio::join!(filter_child.wait_with_output(), lister.wait_with_output());
    let filter_output = filter_output
        .map_err(|e| SearchError::Pipe(format!("failed to collect matcher output: {e}")))?;
    let lister_output = lister_output
        .map_err(|e| SearchError::Pipe(format!("failed to collect listing output: {e}")))?;

    let filter_code = filter_output.status.code();
    let no_matches = filter_code == Some(filter.no_match_status);

    if !listing.accepts(lister_output.status.code()) || !(filter_output.status.success() || no_matches) {
        return Err(SearchError::MatcherExit {
            filter: ProcessReport::new(&filter.program, filter_code, &filter_output.stderr),
            lister: ProcessReport::new(
                &listing.program,
                lister_output.status.code(),
                &lister_output.stderr,
            ),
        });
    }

    if no_matches {
        tracing::debug!(query, "matcher reported no matches");
        return Ok(MatchSet::new());
    }

    let matches: MatchSet = wire::parse_nul_records(&filter_output.stdout)?
        .into_iter()
        .collect();
    tracing::debug!(query, count = matches.len(), "matcher finished");
    Ok(matches)
}

/// Lists candidates, then matches them in-process with nucleo
#[cfg(feature = "nucleo-backend")]
#[derive(Debug, Clone)]
pub struct NucleoMatcher {
    listing: ListingConfig,
}

#[cfg(feature = "nucleo-backend")]
impl NucleoMatcher {
    /// Create an in-process matcher
    #[must_use]
    pub const fn new(listing: ListingConfig) -> Self {
        Self { listing }
    }

    /// Filter `candidates` against `query` with path-aware scoring
    #[must_use]
    pub fn filter_candidates(candidates: Vec<String>, query: &str) -> MatchSet {
        use nucleo::pattern::{CaseMatching, Normalization};
        use nucleo::{Config, Nucleo};
        use std::sync::Arc;

        let mut nucleo: Nucleo<String> =
            Nucleo::new(Config::DEFAULT.match_paths(), Arc::new(|| {}), None, 1);

        let injector = nucleo.injector();
        for path in candidates {
            let _ = injector.push(path, |path, cols| {
                cols[0] = path.as_str().into();
            });
        }

        nucleo.pattern.reparse(
            0,
            query,
            CaseMatching::Smart,
            Normalization::Smart,
            false,
        );

        while nucleo.tick(10).running {}

        let snapshot = nucleo.snapshot();
        snapshot
            .matched_items(..)
            .map(|item| item.data.clone())
            .collect()
    }
}

#[cfg(feature = "nucleo-backend")]
impl FuzzyMatcher for NucleoMatcher {
    async fn invoke(&self, query: &str, base_dir: &Path) -> Result<MatchSet> {
        let candidates = candidates::list_candidates(base_dir, &self.listing).await?;
        let query = query.to_string();

        tokio::task::spawn_blocking(move || Self::filter_candidates(candidates, &query))
            .await
            .map_err(|e| SearchError::Worker(e.to_string()))
    }
}

/// The matcher selected by configuration
#[derive(Debug, Clone)]
pub enum Matcher {
    /// External filter process
    Process(ProcessMatcher),
    /// In-process nucleo matching
    #[cfg(feature = "nucleo-backend")]
    Nucleo(NucleoMatcher),
}

impl Matcher {
    /// Build the configured backend
    #[must_use]
    pub fn from_config(config: &TagpickConfig) -> Self {
        match config.matcher.backend {
            MatcherBackend::Process => Self::Process(ProcessMatcher::new(
                config.listing.clone(),
                config.matcher.clone(),
            )),
            #[cfg(feature = "nucleo-backend")]
            MatcherBackend::Nucleo => Self::Nucleo(NucleoMatcher::new(config.listing.clone())),
            #[cfg(not(feature = "nucleo-backend"))]
            MatcherBackend::Nucleo => {
                tracing::warn!("nucleo backend not compiled in, using the process matcher");
                Self::Process(ProcessMatcher::new(
                    config.listing.clone(),
                    config.matcher.clone(),
                ))
            }
        }
    }
}

impl FuzzyMatcher for Matcher {
    async fn invoke(&self, query: &str, base_dir: &Path) -> Result<MatchSet> {
        match self {
            Self::Process(matcher) => matcher.invoke(query, base_dir).await,
            #[cfg(feature = "nucleo-backend")]
            Self::Nucleo(matcher) => matcher.invoke(query, base_dir).await,
        }
    }
}
