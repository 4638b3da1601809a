//! Interactive search session
//!
//! [`Session`] holds all per-session state and changes only through
//! [`Session::update`]. [`EventLoop`] runs it on a tokio runtime, turning the
//! commands it returns into spawned tasks.

pub mod messages;
pub mod runtime;
pub mod state;
pub mod view;

pub use messages::{Command, Message, RoundId};
pub use runtime::EventLoop;
pub use state::Session;
pub use view::{ResultRow, SearchStatus, SearchView};
