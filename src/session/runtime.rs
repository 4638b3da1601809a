//! Event loop driving a [`Session`]
//!
//! Messages are handled one at a time on the calling task. Commands are
//! executed by spawning tasks that own clones of everything they need and
//! report back through the loop's channel.

use super::messages::{Command, Message};
use super::state::Session;
use super::view::SearchView;
use crate::content::ContentLoader;
use crate::search::FuzzyMatcher;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

/// Owns a session and the resources its commands need
pub struct EventLoop<M: FuzzyMatcher> {
    session: Session,
    matcher: Arc<M>,
    loader: ContentLoader,
    tx: mpsc::UnboundedSender<Message>,
    rx: mpsc::UnboundedReceiver<Message>,
}

impl<M: FuzzyMatcher> EventLoop<M> {
    #[must_use]
    pub fn new(session: Session, matcher: M, loader: ContentLoader) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            session,
            matcher: Arc::new(matcher),
            loader,
            tx,
            rx,
        }
    }

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub const fn loader(&self) -> &ContentLoader {
        &self.loader
    }

    /// Handle for feeding messages from other tasks
    #[must_use]
    pub fn sender(&self) -> mpsc::UnboundedSender<Message> {
        self.tx.clone()
    }

    /// Apply `message` and start whatever work it calls for
    pub fn dispatch(&mut self, message: Message) {
        let commands = self.session.update(message, Instant::now());
        for command in commands {
            self.execute(command);
        }
    }

    /// Wait for the next message from a finished task or timer
    pub async fn next(&mut self) -> Option<Message> {
        self.rx.recv().await
    }

    /// Handle messages until no round, timer or load is outstanding
    pub async fn settle(&mut self) {
        while !self.session.is_idle() {
            match self.rx.recv().await {
                Some(message) => self.dispatch(message),
                None => break,
            }
        }
    }

    /// Search for `query` right away and wait for the result and its content
    pub async fn search_now(&mut self, query: &str) -> SearchView {
        self.dispatch(Message::QueryChanged(query.to_string()));
        self.dispatch(Message::Submit);
        self.settle().await;
        self.session.view()
    }

    fn execute(&self, command: Command) {
        let tx = self.tx.clone();

        match command {
            Command::ArmDebounce(wait) => {
                tokio::spawn(async move {
                    tokio::time::sleep(wait).await;
                    let _ = tx.send(Message::DebounceElapsed);
                });
            }
            Command::Search {
                round,
                query,
                base_dir,
            } => {
                let matcher = Arc::clone(&self.matcher);
                tokio::spawn(async move {
                    let outcome = matcher.invoke(&query, &base_dir).await;
                    let _ = tx.send(Message::SearchFinished {
                        round,
                        query,
                        outcome,
                    });
                });
            }
            Command::LoadContent { path } => {
                let loader = self.loader.clone();
                tokio::spawn(async move {
                    let content = loader.load_async(path.clone()).await;
                    let _ = tx.send(Message::ContentLoaded { path, content });
                });
            }
        }
    }
}
