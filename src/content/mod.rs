//! File content loading
//!
//! Tagged and matched files are read lazily, off the event loop, and at most
//! once per session. Failures become placeholders instead of errors.

pub mod error;
pub mod loader;
pub mod types;

pub use error::ContentError;
pub use loader::{ContentLoader, ContentSource, FsSource};
pub use types::FileContent;
