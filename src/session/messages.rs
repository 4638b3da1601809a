//! Inputs and outputs of the session state machine

use crate::content::FileContent;
use crate::search::{MatchSet, SearchError};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Identifier of one search round, increasing per round
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoundId(pub u64);

impl fmt::Display for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Something that happened: user input, a timer, or a finished task
#[derive(Debug)]
pub enum Message {
    /// The query text was edited
    QueryChanged(String),
    /// A debounce timer armed earlier has fired
    DebounceElapsed,
    /// Search now, skipping the debounce interval
    Submit,
    /// Empty the query and show only tagged files
    Clear,
    CursorUp,
    CursorDown,
    /// Tag or untag the row under the cursor
    ToggleSelected,
    /// Tag a path directly
    Tag(String),
    /// Untag a path directly
    Untag(String),
    /// A search round completed
    SearchFinished {
        round: RoundId,
        query: String,
        outcome: Result<MatchSet, SearchError>,
    },
    /// File content finished loading
    ContentLoaded { path: String, content: FileContent },
}

/// Work the session asks its runtime to carry out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Send `DebounceElapsed` after this long
    ArmDebounce(Duration),
    /// Run the matcher and send `SearchFinished`
    Search {
        round: RoundId,
        query: String,
        base_dir: PathBuf,
    },
    /// Load the file and send `ContentLoaded`
    LoadContent { path: String },
}
