//! Session command - drive an interactive session from line input
//!
//! Input lines and task completions are handled as they arrive. Commands
//! that print state first wait for outstanding searches and loads, so a
//! scripted session prints the same thing on every run.

use super::input::{self, SessionInput};
use crate::TagpickError;
use crate::output::{self, OutputWriter};
use crate::search::FuzzyMatcher;
use crate::session::{EventLoop, Message};
use crate::tags::TagSnapshot;
use crate::views::{BrowseView, ComposeView};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::watch;

type Result<T> = std::result::Result<T, TagpickError>;

/// Views kept in step with the tag snapshots
struct Views {
    receiver: watch::Receiver<TagSnapshot>,
    browse: BrowseView,
    compose: ComposeView,
}

impl Views {
    fn refresh(&mut self) {
        if self.receiver.has_changed().unwrap_or(false) {
            let snapshot = self.receiver.borrow_and_update().clone();
            self.browse.apply(&snapshot);
            self.compose.apply(&snapshot);
        }
    }
}

/// Whether the session should keep reading input
enum Flow {
    Continue,
    Quit,
}

/// Execute the session command
///
/// Ends on `quit` or end of input.
///
/// # Errors
///
/// Returns `TagpickError::Io` if reading input fails.
pub async fn execute<M, R>(
    mut event_loop: EventLoop<M>,
    input: R,
    output: &dyn OutputWriter,
    quiet: bool,
) -> Result<()>
where
    M: FuzzyMatcher,
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let mut views = Views {
        receiver: event_loop.session().subscribe(),
        browse: BrowseView::new(),
        compose: ComposeView::new(),
    };

    if !quiet {
        output.info(&format!(
            "Searching {} (type 'help' for commands)",
            event_loop.session().base_dir().display()
        ));
    }

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    event_loop.settle().await;
                    break;
                };
                match input::parse_line(&line) {
                    Ok(Some(command)) => {
                        let flow = handle(command, &mut event_loop, &mut views, output, quiet).await;
                        if let Flow::Quit = flow {
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(e) => output.error(&e.to_string()),
                }
            }
            Some(message) = event_loop.next() => event_loop.dispatch(message),
        }
        views.refresh();
    }

    tracing::info!(
        tagged = event_loop.session().store().len(),
        "session ended"
    );
    Ok(())
}

async fn handle<M: FuzzyMatcher>(
    command: SessionInput,
    event_loop: &mut EventLoop<M>,
    views: &mut Views,
    output: &dyn OutputWriter,
    quiet: bool,
) -> Flow {
    match command {
        SessionInput::Query(query) => event_loop.dispatch(Message::QueryChanged(query)),
        SessionInput::Enter => event_loop.dispatch(Message::Submit),
        SessionInput::Clear => event_loop.dispatch(Message::Clear),
        SessionInput::Up => event_loop.dispatch(Message::CursorUp),
        SessionInput::Down => event_loop.dispatch(Message::CursorDown),
        SessionInput::Toggle => event_loop.dispatch(Message::ToggleSelected),
        SessionInput::Tag(path) => event_loop.dispatch(Message::Tag(path)),
        SessionInput::Untag(Some(path)) => event_loop.dispatch(Message::Untag(path)),
        SessionInput::Untag(None) => {
            views.refresh();
            match views.browse.untag_selected() {
                Some(path) => event_loop.dispatch(Message::Untag(path)),
                None => output.warning("No tagged file selected"),
            }
        }
        SessionInput::Show => {
            event_loop.settle().await;
            let view = event_loop.session().view();
            for (index, row) in view.results.iter().enumerate() {
                output.write(&output::result_row(row, index == view.cursor, quiet));
            }
            if !quiet {
                output.info(&output::status_line(&view.status));
            }
        }
        SessionInput::Tagged => {
            event_loop.settle().await;
            views.refresh();
            let files = views.browse.files();
            if files.is_empty() && !quiet {
                output.info("No files tagged.");
            }
            for file in files {
                output.write(&output::tagged_file(file, quiet));
            }
        }
        SessionInput::Next => {
            views.refresh();
            views.browse.next();
        }
        SessionInput::Prev => {
            views.refresh();
            views.browse.previous();
        }
        SessionInput::Preview => {
            event_loop.settle().await;
            views.refresh();
            views.browse.toggle_preview();
            if let Some(text) = views.browse.preview() {
                output.write(text);
            }
        }
        SessionInput::Prompt(prompt) => {
            views.compose.hide_output();
            views.compose.set_prompt(prompt);
        }
        SessionInput::Compose => {
            event_loop.settle().await;
            views.refresh();
            output.write(views.compose.generate());
        }
        SessionInput::Help => output.write(input::HELP),
        SessionInput::Quit => return Flow::Quit,
    }
    Flow::Continue
}
