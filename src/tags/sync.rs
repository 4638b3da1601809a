//! Tag snapshot broadcasting
//!
//! Each publication carries the full tagged set and a revision number that
//! increases by one per publication. Receivers keep whichever snapshot has
//! the highest revision they have seen.

use super::store::{TagStore, TaggedFile};
use tokio::sync::watch;

/// Full copy of the tagged set at one point in time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSnapshot {
    /// Publication number; `0` is the empty initial snapshot
    pub revision: u64,
    /// Tagged files in display order
    pub files: Vec<TaggedFile>,
}

impl TagSnapshot {
    /// Whether this snapshot should replace one at `revision`
    #[must_use]
    pub const fn supersedes(&self, revision: u64) -> bool {
        self.revision > revision
    }
}

/// Publishes tag snapshots to any number of views
#[derive(Debug)]
pub struct Synchronizer {
    sender: watch::Sender<TagSnapshot>,
    revision: u64,
}

impl Default for Synchronizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Synchronizer {
    #[must_use]
    pub fn new() -> Self {
        let (sender, _receiver) = watch::channel(TagSnapshot::default());
        Self { sender, revision: 0 }
    }

    /// A receiver starting at the latest snapshot
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<TagSnapshot> {
        self.sender.subscribe()
    }

    /// Broadcast the current contents of `store`; returns the new revision
    pub fn publish(&mut self, store: &TagStore) -> u64 {
        self.revision += 1;
        let snapshot = TagSnapshot {
            revision: self.revision,
            files: store.snapshot(),
        };
        tracing::trace!(revision = self.revision, tagged = snapshot.files.len(), "publishing tag snapshot");
        self.sender.send_replace(snapshot);
        self.revision
    }

    /// Revision of the latest publication
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Copy of the latest snapshot
    #[must_use]
    pub fn latest(&self) -> TagSnapshot {
        self.sender.borrow().clone()
    }
}
