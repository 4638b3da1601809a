//! Tag state
//!
//! The store is the single owner of which files are tagged and of their
//! loaded content. Every change is broadcast as a full snapshot so dependent
//! views can replace their copy wholesale.

pub mod store;
pub mod sync;

pub use store::{TagStore, TaggedFile, ToggleOutcome, compare_paths};
pub use sync::{Synchronizer, TagSnapshot};
