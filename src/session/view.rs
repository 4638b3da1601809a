//! Render-agnostic search state

use std::fmt;

/// Outcome of the most recent search activity
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchStatus {
    /// Nothing searched yet, or the query was cleared
    #[default]
    Idle,
    /// A round is in flight
    Searching,
    /// The last round matched this many paths
    Matched(usize),
    /// The last round matched nothing for a non-empty query
    NoMatches,
    /// The last round failed; the display was left as it was
    Failed(String),
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Type to fuzzy search"),
            Self::Searching => write!(f, "Fuzzy searching and loading content..."),
            Self::Matched(count) => write!(f, "Found {count} fuzzy matches."),
            Self::NoMatches => write!(f, "No fuzzy matches found for your query."),
            Self::Failed(message) => write!(f, "Error: {message}"),
        }
    }
}

/// One displayed row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub path: String,
    pub tagged: bool,
}

/// Everything a front end needs to draw the search screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchView {
    pub query: String,
    pub results: Vec<ResultRow>,
    pub cursor: usize,
    pub status_text: String,
    pub status: SearchStatus,
}
