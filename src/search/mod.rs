//! Incremental fuzzy search
//!
//! One search round lists the candidate paths under the base directory,
//! filters them through a fuzzy matcher and reconciles the resulting match
//! set with the tag store:
//!
//! 1. [`debounce`] turns a burst of query edits into one trigger
//! 2. [`candidates`] picks and runs the listing command
//! 3. [`matcher`] pipes the listing into the filter (or matches in-process)
//! 4. [`reconcile`] merges the matches with every tagged file

pub mod candidates;
pub mod debounce;
pub mod error;
pub mod matcher;
pub mod reconcile;
pub mod wire;

pub use candidates::{ListingCommand, ListingStrategy, list_candidates};
pub use debounce::Debouncer;
pub use error::{ProcessReport, SearchError};
pub use matcher::{FuzzyMatcher, MatchSet, Matcher, ProcessMatcher};
#[cfg(feature = "nucleo-backend")]
pub use matcher::NucleoMatcher;
pub use reconcile::{DisplayEntry, Reconciliation, clamp_cursor, reconcile};
