//! Console writers
//!
//! Commands print through [`OutputWriter`], so a session can run against
//! the terminal or against a buffer that tests read back.

use colored::Colorize;
use std::sync::{Arc, Mutex};

/// Kind of console line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    /// Results and documents, always on stdout
    Normal,
    Error,
    Warning,
    /// Counts and status lines
    Info,
}

/// Sink for console output
pub trait OutputWriter: Send + Sync {
    /// Emit one line at `level`
    fn emit(&self, level: MessageLevel, message: &str);

    fn write(&self, message: &str) {
        self.emit(MessageLevel::Normal, message);
    }

    fn error(&self, message: &str) {
        self.emit(MessageLevel::Error, message);
    }

    fn warning(&self, message: &str) {
        self.emit(MessageLevel::Warning, message);
    }

    fn info(&self, message: &str) {
        self.emit(MessageLevel::Info, message);
    }
}

/// Terminal writer
///
/// Results go to stdout undecorated so they can be piped. Errors and
/// warnings go to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutWriter;

impl StdoutWriter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl OutputWriter for StdoutWriter {
    fn emit(&self, level: MessageLevel, message: &str) {
        match level {
            MessageLevel::Normal => println!("{message}"),
            MessageLevel::Info => println!("{}", message.dimmed()),
            MessageLevel::Warning => eprintln!("{} {message}", "warning:".yellow()),
            MessageLevel::Error => eprintln!("{} {message}", "error:".red().bold()),
        }
    }
}

/// In-memory writer; clones share one buffer
#[derive(Debug, Clone, Default)]
pub struct BufferedWriter {
    lines: Arc<Mutex<Vec<(MessageLevel, String)>>>,
}

impl BufferedWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything emitted so far, in order
    #[must_use]
    pub fn messages(&self) -> Vec<(MessageLevel, String)> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }

    /// Text of every line emitted at `level`
    #[must_use]
    pub fn lines(&self, level: MessageLevel) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter_map(|(l, message)| (l == level).then_some(message))
            .collect()
    }
}

impl OutputWriter for BufferedWriter {
    fn emit(&self, level: MessageLevel, message: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push((level, message.to_string()));
        }
    }
}
