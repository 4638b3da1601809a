//! Views that depend on the tagged set
//!
//! Neither view mutates tag state. Both hold a copy of the latest
//! [`TagSnapshot`](crate::tags::TagSnapshot) and replace it wholesale
//! whenever a newer one arrives.

pub mod browse;
pub mod compose;

pub use browse::BrowseView;
pub use compose::ComposeView;

/// Marker shown in place of content that has not been loaded yet
pub const NOT_LOADED: &str = "(content not loaded yet)";
