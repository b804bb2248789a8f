//! Input handling and keybindings

use crate::app::App;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Result of handling input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
    OpenEditor,
}

/// Handle a key event; `viewport_height` is the number of text rows visible
pub fn handle_input(app: &mut App, key: KeyEvent, viewport_height: usize) -> Result<Action> {
    if !matches!(key.code, KeyCode::Modifier(_)) {
        app.clear_status_message();
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => {
                app.quit();
                return Ok(Action::Quit);
            }
            KeyCode::Char('d') => app.scroll_down(viewport_height / 2, viewport_height),
            KeyCode::Char('u') => app.scroll_up(viewport_height / 2),
            KeyCode::Char('f') => app.scroll_down(viewport_height, viewport_height),
            KeyCode::Char('b') => app.scroll_up(viewport_height),
            _ => {}
        }
        return Ok(Action::Continue);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.quit();
            return Ok(Action::Quit);
        }
        KeyCode::Char('j') | KeyCode::Down => app.scroll_down(1, viewport_height),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_up(1),
        KeyCode::Char(' ') | KeyCode::PageDown => app.scroll_down(viewport_height, viewport_height),
        KeyCode::Char('b') | KeyCode::PageUp => app.scroll_up(viewport_height),
        KeyCode::Char('g') | KeyCode::Home => app.scroll_to_top(),
        KeyCode::Char('G') | KeyCode::End => app.scroll_to_bottom(viewport_height),
        KeyCode::Char('n') | KeyCode::Right => app.next_chapter(),
        KeyCode::Char('p') | KeyCode::Left => app.prev_chapter(),
        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Char('r') => {
            if let Err(e) = app.reload_chapter() {
                app.set_status_message(format!("Reload failed: {:#}", e));
            }
        }
        KeyCode::Char('e') => return Ok(Action::OpenEditor),
        _ => {}
    }

    Ok(Action::Continue)
}
