//! Integration tests for tagpick
//!
//! These tests drive a full event loop over a temporary directory, with the
//! listing and the fuzzy filter played by small shell scripts so the
//! process pipeline runs for real.

use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Duration;
use tagpick::config::{ListingConfig, MatcherConfig, TagpickConfig};
use tagpick::content::{ContentLoader, FileContent};
use tagpick::search::{Matcher, ProcessMatcher};
use tagpick::session::{EventLoop, Message, SearchStatus, Session};
use tagpick::views::{BrowseView, ComposeView};
use tempfile::TempDir;

/// Helper function to create a project directory with the given files
fn project(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (path, content) in files {
        let full = dir.path().join(path);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(full, content).unwrap();
    }
    dir
}

fn go_project() -> TempDir {
    project(&[
        ("a.go", "package a\n"),
        ("b.go", "package b\n"),
        ("sub/c.go", "package c\n"),
        ("README.md", "# project\n"),
    ])
}

/// Lists every regular file; `./` prefixes are stripped by the parser
fn find_listing() -> ListingConfig {
    ListingConfig {
        command: Some(vec![
            "find".to_string(),
            ".".to_string(),
            "-type".to_string(),
            "f".to_string(),
        ]),
        ..ListingConfig::default()
    }
}

fn sh_filter(script: &str) -> MatcherConfig {
    MatcherConfig {
        program: "sh".to_string(),
        args: vec![
            "-c".to_string(),
            script.to_string(),
            "sh".to_string(),
            "{query}".to_string(),
        ],
        ..MatcherConfig::default()
    }
}

/// Substring filter with the fzf exit convention, logging each query to `log`
fn substring_filter(log: &Path) -> MatcherConfig {
    sh_filter(&format!(
        r#"echo "$1" >> '{}'; out=$(grep -F -- "$1") || exit 1; printf '%s' "$out" | tr '\n' '\0'"#,
        log.display()
    ))
}

fn event_loop(base: &Path, filter: MatcherConfig) -> EventLoop<ProcessMatcher> {
    let session = Session::new(base, Duration::from_millis(20));
    let loader = ContentLoader::from_fs(base, 1024 * 1024);
    EventLoop::new(session, ProcessMatcher::new(find_listing(), filter), loader)
}

fn rows(event_loop: &EventLoop<impl tagpick::search::FuzzyMatcher>) -> Vec<(String, bool)> {
    event_loop
        .session()
        .view()
        .results
        .into_iter()
        .map(|row| (row.path, row.tagged))
        .collect()
}

fn row(path: &str, tagged: bool) -> (String, bool) {
    (path.to_string(), tagged)
}

fn select(event_loop: &mut EventLoop<ProcessMatcher>, path: &str) {
    let index = rows(event_loop)
        .iter()
        .position(|(p, _)| p == path)
        .unwrap();
    while event_loop.session().cursor() > index {
        event_loop.dispatch(Message::CursorUp);
    }
    while event_loop.session().cursor() < index {
        event_loop.dispatch(Message::CursorDown);
    }
}

#[tokio::test]
async fn test_fuzzy_query_then_tag() {
    let dir = go_project();
    let log_dir = TempDir::new().unwrap();
    let mut event_loop = event_loop(
        dir.path(),
        substring_filter(&log_dir.path().join("calls")),
    );

    let view = event_loop.search_now(".go").await;

    assert_eq!(view.status, SearchStatus::Matched(3));
    assert_eq!(
        rows(&event_loop),
        vec![row("a.go", false), row("b.go", false), row("sub/c.go", false)]
    );

    select(&mut event_loop, "b.go");
    event_loop.dispatch(Message::ToggleSelected);
    event_loop.settle().await;

    let snapshot = event_loop.session().tag_snapshot();
    assert_eq!(snapshot.files.len(), 1);
    assert_eq!(snapshot.files[0].path, "b.go");
    assert_eq!(snapshot.files[0].content, Some(FileContent::from("package b\n")));
}

#[tokio::test]
async fn test_tag_persists_across_unrelated_query() {
    let dir = go_project();
    let log_dir = TempDir::new().unwrap();
    let mut event_loop = event_loop(
        dir.path(),
        substring_filter(&log_dir.path().join("calls")),
    );

    event_loop.search_now(".go").await;
    select(&mut event_loop, "b.go");
    event_loop.dispatch(Message::ToggleSelected);

    let view = event_loop.search_now("README").await;

    assert_eq!(view.status, SearchStatus::Matched(1));
    assert_eq!(rows(&event_loop), vec![row("b.go", true), row("README.md", false)]);
    assert_eq!(
        event_loop.session().tag_snapshot().files[0].content,
        Some(FileContent::from("package b\n"))
    );
}

#[tokio::test]
async fn test_no_match_status_is_not_an_error() {
    let dir = go_project();
    let mut event_loop = event_loop(dir.path(), sh_filter("cat >/dev/null; exit 1"));

    event_loop.dispatch(Message::Tag("b.go".to_string()));
    let view = event_loop.search_now("zzz").await;

    assert_eq!(view.status, SearchStatus::NoMatches);
    assert_eq!(view.status_text, "No fuzzy matches found for your query.");
    assert_eq!(rows(&event_loop), vec![row("b.go", true)]);
}

#[tokio::test]
async fn test_matcher_failure_keeps_display_and_tags() {
    let dir = go_project();
    let mut event_loop = event_loop(
        dir.path(),
        sh_filter("cat >/dev/null; echo 'bad flag' >&2; exit 2"),
    );

    event_loop.dispatch(Message::Tag("a.go".to_string()));
    event_loop.settle().await;
    let before = rows(&event_loop);

    let view = event_loop.search_now("go").await;

    match &view.status {
        SearchStatus::Failed(message) => {
            assert!(message.contains("sh exited with status 2"));
            assert!(message.contains("bad flag"));
        }
        other => panic!("Expected Failed, got {other:?}"),
    }
    assert_eq!(before, vec![row("a.go", true)]);
    assert_eq!(rows(&event_loop), before);
    assert_eq!(event_loop.session().store().len(), 1);
}

#[tokio::test]
async fn test_typing_burst_invokes_filter_once() {
    let dir = go_project();
    let log_dir = TempDir::new().unwrap();
    let log = log_dir.path().join("calls");
    let mut event_loop = event_loop(dir.path(), substring_filter(&log));

    for query in ["s", "su", "sub"] {
        event_loop.dispatch(Message::QueryChanged(query.to_string()));
    }
    event_loop.settle().await;

    assert_eq!(fs::read_to_string(&log).unwrap(), "sub\n");
    assert_eq!(rows(&event_loop), vec![row("sub/c.go", false)]);
}

#[tokio::test]
async fn test_content_cached_after_file_changes() {
    let dir = go_project();
    let log_dir = TempDir::new().unwrap();
    let mut event_loop = event_loop(
        dir.path(),
        substring_filter(&log_dir.path().join("calls")),
    );

    event_loop.dispatch(Message::Tag("a.go".to_string()));
    event_loop.settle().await;
    fs::write(dir.path().join("a.go"), "package changed\n").unwrap();

    event_loop.search_now("a.go").await;
    event_loop.dispatch(Message::Untag("a.go".to_string()));
    event_loop.dispatch(Message::Tag("a.go".to_string()));
    event_loop.settle().await;

    assert_eq!(
        event_loop.loader().cached("a.go"),
        Some(FileContent::from("package a\n"))
    );
    assert_eq!(
        event_loop.session().tag_snapshot().files[0].content,
        Some(FileContent::from("package a\n"))
    );
}

#[tokio::test]
async fn test_unreadable_tagged_file_gets_placeholder() {
    let dir = go_project();
    let mut event_loop = event_loop(dir.path(), sh_filter("cat >/dev/null; exit 1"));

    event_loop.dispatch(Message::Tag("missing.go".to_string()));
    event_loop.settle().await;

    let snapshot = event_loop.session().tag_snapshot();
    let content = snapshot.files[0].content.as_ref().unwrap();
    assert!(content.is_unreadable());
    assert!(content.as_str().starts_with("Error loading content: "));
}

#[tokio::test]
async fn test_views_follow_snapshots() {
    let dir = go_project();
    let log_dir = TempDir::new().unwrap();
    let mut event_loop = event_loop(
        dir.path(),
        substring_filter(&log_dir.path().join("calls")),
    );
    let mut receiver = event_loop.session().subscribe();
    let mut browse = BrowseView::new();
    let mut compose = ComposeView::new();
    compose.set_prompt("Summarise");
    compose.generate();

    event_loop.dispatch(Message::Tag("sub/c.go".to_string()));
    event_loop.dispatch(Message::Tag("a.go".to_string()));
    event_loop.settle().await;

    let snapshot = receiver.borrow_and_update().clone();
    assert!(browse.apply(&snapshot));
    assert!(compose.apply(&snapshot));
    assert_eq!(browse.files().len(), 2);
    assert!(compose.output().unwrap().contains("### sub/c.go\n\n```\npackage c\n```"));

    browse.next();
    let untag = browse.untag_selected().unwrap();
    assert_eq!(untag, "sub/c.go");
    event_loop.dispatch(Message::Untag(untag));

    let snapshot = receiver.borrow_and_update().clone();
    browse.apply(&snapshot);
    compose.apply(&snapshot);
    assert_eq!(browse.files().len(), 1);
    assert!(!compose.output().unwrap().contains("sub/c.go"));
}

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok()
}

fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args(args)
        .current_dir(dir)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .unwrap();
    assert!(status.success());
}

#[tokio::test]
async fn test_git_work_tree_with_configured_matcher() {
    if !git_available() {
        return;
    }
    let dir = go_project();
    git(dir.path(), &["init", "-q"]);
    git(dir.path(), &["add", "a.go", "b.go", "sub/c.go"]);

    let log_dir = TempDir::new().unwrap();
    let mut config = TagpickConfig::default();
    config.search.debounce_ms = 20;
    config.matcher = substring_filter(&log_dir.path().join("calls"));

    let mut event_loop = tagpick::commands::event_loop(&config, dir.path().to_path_buf());
    assert!(matches!(Matcher::from_config(&config), Matcher::Process(_)));

    let view = event_loop.search_now("o").await;

    // README.md is untracked, so the git listing leaves it out
    assert_eq!(view.status, SearchStatus::Matched(3));
    assert_eq!(
        rows(&event_loop),
        vec![row("a.go", false), row("b.go", false), row("sub/c.go", false)]
    );
}
