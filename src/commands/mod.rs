//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI
//! args and runs against a base directory.

pub mod input;
pub mod list;
pub mod search;
pub mod session;

use crate::config::TagpickConfig;
use crate::content::ContentLoader;
use crate::search::Matcher;
use crate::session::{EventLoop, Session};
use std::path::PathBuf;

// Re-export execute functions for convenience
pub use list::execute as list;
pub use search::execute as search;
pub use session::execute as session;

/// Event loop over `base_dir` wired up from `config`
#[must_use]
pub fn event_loop(config: &TagpickConfig, base_dir: PathBuf) -> EventLoop<Matcher> {
    let loader = ContentLoader::from_fs(base_dir.clone(), config.content.max_file_size);
    let session = Session::new(base_dir, config.search.debounce_interval());
    EventLoop::new(session, Matcher::from_config(config), loader)
}
