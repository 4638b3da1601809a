//! Search command - run one round and print the reconciled results

use crate::output::{self, OutputWriter};
use crate::search::FuzzyMatcher;
use crate::session::{EventLoop, Message, SearchStatus};
use crate::views::ComposeView;
use crate::TagpickError;

type Result<T> = std::result::Result<T, TagpickError>;

/// Options for a one-shot search
#[derive(Debug, Clone, Default)]
pub struct SearchOptions<'a> {
    /// Paths to tag before searching
    pub tags: &'a [String],
    /// Print the composed document after the results
    pub compose: bool,
    /// User request for the composed document
    pub prompt: Option<&'a str>,
    pub quiet: bool,
}

/// Execute the search command
///
/// Tagged paths are listed whether or not they match.
///
/// # Errors
///
/// Returns `TagpickError::SearchFailed` if the round failed.
pub async fn execute<M: FuzzyMatcher>(
    mut event_loop: EventLoop<M>,
    query: &str,
    options: &SearchOptions<'_>,
    output: &dyn OutputWriter,
) -> Result<()> {
    for path in options.tags {
        event_loop.dispatch(Message::Tag(path.clone()));
    }

    let view = event_loop.search_now(query).await;

    for row in &view.results {
        output.write(&output::result_row(row, false, options.quiet));
    }
    if !options.quiet {
        output.info(&output::status_line(&view.status));
    }

    if options.compose {
        let mut compose = ComposeView::new();
        compose.set_prompt(options.prompt.unwrap_or_default());
        compose.apply(&event_loop.session().tag_snapshot());
        output.write(compose.generate());
    }

    match view.status {
        SearchStatus::Failed(message) => Err(TagpickError::SearchFailed(message)),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentLoader;
    use crate::output::{BufferedWriter, MessageLevel};
    use crate::session::Session;
    use crate::testing::{CountingSource, ScriptedMatcher};
    use std::path::PathBuf;
    use std::time::Duration;

    fn event_loop(matcher: ScriptedMatcher) -> EventLoop<ScriptedMatcher> {
        let source = CountingSource::with_files(&[("a.go", "package a\n"), ("b.go", "package b\n")]);
        EventLoop::new(
            Session::new(PathBuf::new(), Duration::from_millis(10)),
            matcher,
            ContentLoader::new(source, PathBuf::new(), 1024),
        )
    }

    #[tokio::test]
    async fn test_prints_results_quietly() {
        let matcher = ScriptedMatcher::new(&[("go", Some(&["b.go", "a.go"][..]))]);
        let output = BufferedWriter::new();
        let options = SearchOptions {
            quiet: true,
            ..SearchOptions::default()
        };

        execute(event_loop(matcher), "go", &options, &output).await.unwrap();
        assert_eq!(output.lines(MessageLevel::Normal), vec!["a.go", "b.go"]);
    }

    #[tokio::test]
    async fn test_tagged_paths_survive_no_matches() {
        let matcher = ScriptedMatcher::new(&[]);
        let output = BufferedWriter::new();
        let tags = vec!["b.go".to_string()];
        let options = SearchOptions {
            tags: &tags,
            quiet: true,
            ..SearchOptions::default()
        };

        execute(event_loop(matcher), "zzz", &options, &output).await.unwrap();
        assert_eq!(output.lines(MessageLevel::Normal), vec!["b.go"]);
    }

    #[tokio::test]
    async fn test_compose_includes_tagged_content() {
        let matcher = ScriptedMatcher::new(&[("go", Some(&["a.go", "b.go"][..]))]);
        let output = BufferedWriter::new();
        let tags = vec!["a.go".to_string()];
        let options = SearchOptions {
            tags: &tags,
            compose: true,
            prompt: Some("Review"),
            quiet: true,
        };

        execute(event_loop(matcher), "go", &options, &output).await.unwrap();

        let lines = output.lines(MessageLevel::Normal);
        let document = lines.last().unwrap();
        assert!(document.starts_with("## User Request\n\nReview\n\n## Relevant Files"));
        assert!(document.contains("### a.go\n\n```\npackage a\n```"));
        assert!(!document.contains("b.go"));
    }

    #[tokio::test]
    async fn test_failed_round_is_error() {
        let matcher = ScriptedMatcher::new(&[("bad", None)]);
        let err = execute(event_loop(matcher), "bad", &SearchOptions::default(), &BufferedWriter::new())
            .await
            .unwrap_err();
        assert!(matches!(err, TagpickError::SearchFailed(msg) if msg.contains("scripted failure")));
    }
}
