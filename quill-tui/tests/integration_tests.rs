//! Integration tests for quill-tui
//!
//! These tests drive the reader the way the event loop does: chapters are
//! loaded from disk, rendered, navigated and reloaded.

use quill_core::{ChapterFile, Config, EditingSession};
use quill_tui::input::{handle_input, Action};
use quill_tui::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::text::Line;
use std::io::Write as _;
use tempfile::NamedTempFile;

/// Helper to create a chapter file with known content
fn create_chapter(content: &str) -> (ChapterFile, NamedTempFile) {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write test content");
    file.flush().expect("Failed to flush");

    let chapter = ChapterFile::load(file.path()).expect("Failed to load test chapter");
    (chapter, file)
}

/// Helper to create a reader over the given chapters
/// Returns (App, files) - keep the files alive for the duration of the test
fn create_test_app(contents: &[&str]) -> (App, Vec<NamedTempFile>) {
    let (chapters, files): (Vec<_>, Vec<_>) = contents.iter().map(|c| create_chapter(c)).unzip();

    let mut config = Config::default();
    #[cfg(feature = "watch")]
    {
        config.watch.enabled = false;
    }

    (App::new(config, chapters).expect("Failed to create app"), files)
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn texts(lines: &[Line<'_>]) -> Vec<String> {
    lines
        .iter()
        .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
        .collect()
}

#[test]
fn integration_app_initialization() {
    let (app, _files) = create_test_app(&["### Opening\n\nIt was late.\n"]);

    assert!(!app.should_quit);
    assert_eq!(app.current, 0);
    assert_eq!(app.scroll, 0);
    assert_eq!(app.nav().prev, None);
    assert_eq!(app.nav().next, None);
}

#[test]
fn integration_no_chapters_is_error() {
    assert!(App::new(Config::default(), Vec::new()).is_err());
}

#[test]
fn integration_render_chapter() {
    let (mut app, _files) = create_test_app(&["### Opening\nFirst.\nSecond.\n---\nAfter the break."]);

    let lines = app.rendered_lines(60).to_vec();
    let texts = texts(&lines);

    assert_eq!(texts[0], "Opening");
    assert_eq!(texts[2], "First.");
    assert_eq!(texts[4], "Second.");
    assert!(texts[6].starts_with('─'));
    assert_eq!(texts[8], "After the break.");
}

#[test]
fn integration_chapter_navigation() {
    let (mut app, _files) = create_test_app(&["one", "two", "three"]);

    handle_input(&mut app, key(KeyCode::Char('n')), 10).unwrap();
    handle_input(&mut app, key(KeyCode::Char('n')), 10).unwrap();
    assert_eq!(app.current, 2);
    assert_eq!(app.nav().next, None);

    let lines = app.rendered_lines(40).to_vec();
    assert_eq!(texts(&lines)[0], "three");

    handle_input(&mut app, key(KeyCode::Char('p')), 10).unwrap();
    assert_eq!(app.current, 1);
    assert_eq!(app.nav().prev, Some(1));
}

#[test]
fn integration_navigation_resets_scroll() {
    let long: Vec<String> = (0..50).map(|i| format!("Paragraph {}", i)).collect();
    let long = long.join("\n");
    let (mut app, _files) = create_test_app(&[long.as_str(), "short"]);

    handle_input(&mut app, key(KeyCode::PageDown), 10).unwrap();
    assert_eq!(app.scroll, 10);

    handle_input(&mut app, key(KeyCode::Char('n')), 10).unwrap();
    assert_eq!(app.scroll, 0);
}

#[test]
fn integration_theme_toggle() {
    let (mut app, _files) = create_test_app(&["text"]);
    let initial = app.theme_variant;

    handle_input(&mut app, key(KeyCode::Char('t')), 10).unwrap();
    assert_ne!(app.theme_variant, initial);

    handle_input(&mut app, key(KeyCode::Char('t')), 10).unwrap();
    assert_eq!(app.theme_variant, initial);
}

#[test]
fn integration_reload_picks_up_edits() {
    let (mut app, mut files) = create_test_app(&["before"]);
    assert_eq!(texts(app.rendered_lines(40))[0], "before");

    files[0].write_all(b"\nafter").unwrap();
    files[0].flush().unwrap();

    handle_input(&mut app, key(KeyCode::Char('r')), 10).unwrap();
    assert_eq!(app.current_chapter().rev, 2);
    assert_eq!(texts(app.rendered_lines(40))[2], "after");
}

#[test]
fn integration_editing_session_saved_and_read() {
    let (mut app, _files) = create_test_app(&["hello world"]);

    let mut session = EditingSession::with_selection(&app.current_chapter().text(), 6, 11);
    session.bold();
    session.insert_divider();
    assert_eq!(session.text(), "hello **world\n---\n**");

    let mut session = EditingSession::with_selection(&app.current_chapter().text(), 6, 11);
    session.bold();
    let current = app.current;
    app.chapters[current].save_text(&session.text()).unwrap();

    let lines = app.rendered_lines(40).to_vec();
    let spans = &lines[0].spans;
    assert_eq!(spans[1].content, "world");
    assert!(spans[1]
        .style
        .add_modifier
        .contains(ratatui::style::Modifier::BOLD));
}

#[test]
fn integration_quit() {
    let (mut app, _files) = create_test_app(&["text"]);
    let action = handle_input(&mut app, key(KeyCode::Char('q')), 10).unwrap();
    assert_eq!(action, Action::Quit);
    assert!(app.should_quit);
}
