//! The session state machine
//!
//! `Session::update` is the only place session state changes. It never
//! waits on anything: work that takes time is returned as [`Command`]s and
//! its results come back later as [`Message`]s.

use super::messages::{Command, Message, RoundId};
use super::view::{ResultRow, SearchStatus, SearchView};
use crate::content::FileContent;
use crate::search::{Debouncer, DisplayEntry, MatchSet, SearchError, clamp_cursor, reconcile, wire};
use crate::tags::{Synchronizer, TagSnapshot, TagStore, ToggleOutcome};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::sync::watch;

/// All state of one interactive session
#[derive(Debug)]
pub struct Session {
    base_dir: PathBuf,
    query: String,
    debouncer: Debouncer,
    last_round: u64,
    in_flight: Option<RoundId>,
    abandoned: bool,
    store: TagStore,
    matches: MatchSet,
    display: Vec<DisplayEntry>,
    cursor: usize,
    status: SearchStatus,
    pending_loads: HashSet<String>,
    sync: Synchronizer,
}

impl Session {
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>, debounce_interval: Duration) -> Self {
        Self {
            base_dir: base_dir.into(),
            query: String::new(),
            debouncer: Debouncer::new(debounce_interval),
            last_round: 0,
            in_flight: None,
            abandoned: false,
            store: TagStore::new(),
            matches: MatchSet::new(),
            display: Vec::new(),
            cursor: 0,
            status: SearchStatus::Idle,
            pending_loads: HashSet::new(),
            sync: Synchronizer::new(),
        }
    }

    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub const fn status(&self) -> &SearchStatus {
        &self.status
    }

    #[must_use]
    pub const fn store(&self) -> &TagStore {
        &self.store
    }

    #[must_use]
    pub fn display(&self) -> &[DisplayEntry] {
        &self.display
    }

    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Round currently running, if any
    #[must_use]
    pub const fn in_flight(&self) -> Option<RoundId> {
        self.in_flight
    }

    /// Receiver for tag snapshots
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<TagSnapshot> {
        self.sync.subscribe()
    }

    #[must_use]
    pub fn tag_snapshot(&self) -> TagSnapshot {
        self.sync.latest()
    }

    /// No round running, no load outstanding and no trigger waiting
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.in_flight.is_none() && self.pending_loads.is_empty() && !self.debouncer.is_pending()
    }

    /// Current state for rendering
    #[must_use]
    pub fn view(&self) -> SearchView {
        SearchView {
            query: self.query.clone(),
            results: self
                .display
                .iter()
                .map(|entry| ResultRow {
                    path: entry.path.clone(),
                    tagged: entry.tagged,
                })
                .collect(),
            cursor: self.cursor,
            status_text: self.status.to_string(),
            status: self.status.clone(),
        }
    }

    /// Apply one message and return the work it calls for
    pub fn update(&mut self, message: Message, now: Instant) -> Vec<Command> {
        match message {
            Message::QueryChanged(query) => self.on_query_changed(query, now),
            Message::DebounceElapsed => self.on_debounce_elapsed(now),
            Message::Submit => self.on_submit(now),
            Message::Clear => {
                self.query.clear();
                self.show_tagged_only();
                Vec::new()
            }
            Message::CursorUp => {
                self.cursor = self.cursor.saturating_sub(1);
                Vec::new()
            }
            Message::CursorDown => {
                self.cursor = clamp_cursor(self.cursor + 1, self.display.len());
                Vec::new()
            }
            Message::ToggleSelected => self.on_toggle_selected(),
            Message::Tag(path) => self.on_tag(&wire::normalize_path(&path)),
            Message::Untag(path) => self.on_untag(&wire::normalize_path(&path)),
            Message::SearchFinished {
                round,
                query,
                outcome,
            } => self.on_search_finished(round, &query, outcome, now),
            Message::ContentLoaded { path, content } => {
                self.on_content_loaded(&path, &content);
                Vec::new()
            }
        }
    }

    fn on_query_changed(&mut self, query: String, now: Instant) -> Vec<Command> {
        self.query = query;
        if self.query.trim().is_empty() {
            self.show_tagged_only();
            return Vec::new();
        }

        vec![Command::ArmDebounce(self.debouncer.on_query_changed(now))]
    }

    fn on_debounce_elapsed(&mut self, now: Instant) -> Vec<Command> {
        if self.debouncer.on_timer_fired(now, self.in_flight.is_some()) {
            self.start_round().into_iter().collect()
        } else {
            Vec::new()
        }
    }

    fn on_submit(&mut self, now: Instant) -> Vec<Command> {
        if self.query.trim().is_empty() {
            return Vec::new();
        }
        if self.in_flight.is_some() {
            // Held until the running round completes
            self.debouncer.on_query_changed(now);
            return Vec::new();
        }

        self.debouncer.reset();
        self.start_round().into_iter().collect()
    }

    fn start_round(&mut self) -> Option<Command> {
        let query = self.query.trim().to_string();
        if query.is_empty() {
            return None;
        }

        self.last_round += 1;
        let round = RoundId(self.last_round);
        self.in_flight = Some(round);
        self.abandoned = false;
        self.status = SearchStatus::Searching;
        tracing::debug!(%round, query, "starting search round");

        Some(Command::Search {
            round,
            query,
            base_dir: self.base_dir.clone(),
        })
    }

    fn on_search_finished(
        &mut self,
        round: RoundId,
        query: &str,
        outcome: Result<MatchSet, SearchError>,
        now: Instant,
    ) -> Vec<Command> {
        if self.in_flight != Some(round) {
            tracing::debug!(%round, query, "discarding stale search result");
            return Vec::new();
        }
        self.in_flight = None;

        let mut commands = Vec::new();
        if self.abandoned {
            self.abandoned = false;
            tracing::debug!(%round, query, "discarding abandoned search result");
        } else {
            match outcome {
                Ok(matches) => {
                    tracing::info!(%round, query, count = matches.len(), "search round finished");
                    self.status = if matches.is_empty() {
                        SearchStatus::NoMatches
                    } else {
                        SearchStatus::Matched(matches.len())
                    };
                    self.matches = matches;
                    commands.extend(self.rebuild_display());
                    self.sync.publish(&self.store);
                }
                Err(e) => {
                    tracing::warn!(%round, query, error = %e, "search round failed");
                    self.status = SearchStatus::Failed(e.to_string());
                }
            }
        }

        if let Some(wait) = self.debouncer.remaining(now) {
            commands.push(Command::ArmDebounce(wait));
        }
        commands
    }

    fn on_toggle_selected(&mut self) -> Vec<Command> {
        let Some(entry) = self.display.get(self.cursor) else {
            return Vec::new();
        };
        let path = entry.path.clone();
        let content = entry.content.clone();

        let mut commands = Vec::new();
        if let ToggleOutcome::Tagged { needs_load: true } = self.store.toggle(&path, content) {
            commands.extend(self.request_load(path));
        }
        commands.extend(self.rebuild_display());
        self.sync.publish(&self.store);
        commands
    }

    fn on_tag(&mut self, path: &str) -> Vec<Command> {
        let content = self
            .display
            .iter()
            .find(|entry| entry.path == path)
            .and_then(|entry| entry.content.clone());
        let needs_load = content.is_none();

        if !self.store.tag(path, content) {
            return Vec::new();
        }

        let mut commands = Vec::new();
        if needs_load {
            commands.extend(self.request_load(path.to_string()));
        }
        commands.extend(self.rebuild_display());
        self.sync.publish(&self.store);
        commands
    }

    fn on_untag(&mut self, path: &str) -> Vec<Command> {
        if !self.store.untag(path) {
            return Vec::new();
        }
        let commands = self.rebuild_display();
        self.sync.publish(&self.store);
        commands
    }

    fn on_content_loaded(&mut self, path: &str, content: &FileContent) {
        self.pending_loads.remove(path);

        for entry in self.display.iter_mut().filter(|entry| entry.path == path) {
            if entry.content.is_none() {
                entry.content = Some(content.clone());
            }
        }

        if self.store.backfill(path, content) {
            self.sync.publish(&self.store);
        }
    }

    /// Show the tagged files alone and stop waiting for the running round
    fn show_tagged_only(&mut self) {
        self.debouncer.reset();
        self.abandoned = self.in_flight.is_some();
        self.matches.clear();
        self.status = SearchStatus::Idle;

        let reconciliation = reconcile(&self.matches, &self.store, &self.display);
        self.display = reconciliation.entries;
        self.cursor = clamp_cursor(self.cursor, self.display.len());
        self.sync.publish(&self.store);
    }

    /// Recompute the display from the latest matches and the store
    fn rebuild_display(&mut self) -> Vec<Command> {
        let reconciliation = reconcile(&self.matches, &self.store, &self.display);
        self.display = reconciliation.entries;
        self.cursor = clamp_cursor(self.cursor, self.display.len());

        reconciliation
            .load_requests
            .into_iter()
            .filter_map(|path| self.request_load(path))
            .collect()
    }

    fn request_load(&mut self, path: String) -> Option<Command> {
        if self.pending_loads.insert(path.clone()) {
            Some(Command::LoadContent { path })
        } else {
            None
        }
    }
}
