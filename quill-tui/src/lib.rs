//! Quill TUI - Terminal reader for story chapters
//!
//! This crate contains all ratatui/crossterm integration:
//! - App state and the event loop
//! - Rendering of chapter nodes into styled, wrapped lines
//! - Theme system
//! - File watching and external editor launch
//! - Styled printing to stdout

pub mod app;
pub mod editor;
pub mod input;
pub mod print;
pub mod render;
pub mod terminal;
pub mod theme;
pub mod ui;

#[cfg(feature = "watch")]
pub mod watcher;

use anyhow::{Context, Result};
use crossterm::event::{Event, KeyEventKind};
use std::time::Duration;

// Re-export main types
pub use app::App;

/// Run the reader until the user quits
pub fn run(mut app: App) -> Result<()> {
    terminal::install_panic_hook();
    let mut terminal = terminal::init().context("Failed to initialize terminal")?;

    let result = run_loop(&mut terminal, &mut app);

    // Always restore terminal, even if run_loop fails
    terminal::restore().context("Failed to restore terminal")?;

    result
}

fn run_loop(terminal: &mut terminal::Tui, app: &mut App) -> Result<()> {
    loop {
        let viewport_height =
            ui::viewport_height(terminal.size()?.height, app.config.reader.show_status);

        terminal
            .draw(|frame| ui::draw(frame, app))
            .context("Failed to draw frame")?;

        if app.should_quit {
            break;
        }

        if crossterm::event::poll(Duration::from_millis(100)).context("Failed to poll events")? {
            if let Event::Key(key) = crossterm::event::read().context("Failed to read event")? {
                // Only handle key press events, ignore release
                if key.kind == KeyEventKind::Press {
                    let action = input::handle_input(app, key, viewport_height)?;

                    if action == input::Action::OpenEditor {
                        terminal::restore().context("Failed to restore terminal for editor")?;
                        let editor_result = app.open_in_editor();
                        *terminal = terminal::init()
                            .context("Failed to reinitialize terminal after editor")?;

                        if let Err(e) = editor_result {
                            log::warn!("editor failed: {:#}", e);
                            app.set_status_message(format!("Editor error: {}", e));
                        }
                    }
                }
            }
        }

        #[cfg(feature = "watch")]
        poll_watcher(app);
    }

    Ok(())
}

#[cfg(feature = "watch")]
fn poll_watcher(app: &mut App) {
    let changed = match app.watcher {
        Some(ref mut watcher) => watcher.check_changed(watcher::DEBOUNCE_MS),
        None => false,
    };
    if !changed {
        return;
    }

    if app.config.watch.auto_reload {
        if let Err(e) = app.reload_chapter() {
            log::warn!("failed to reload chapter: {:#}", e);
            app.set_status_message(format!("Reload failed: {}", e));
        }
    } else {
        let current = app.current;
        app.chapters[current].dirty_on_disk = true;
    }
}
