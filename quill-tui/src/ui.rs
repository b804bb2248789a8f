//! UI rendering

use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw the UI
pub fn draw(frame: &mut Frame, app: &mut App) {
    let status_height = if app.config.reader.show_status { 1 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),                // Chapter text
            Constraint::Length(status_height), // Status bar
        ])
        .split(frame.area());

    render_chapter(frame, app, chunks[0]);

    if app.config.reader.show_status {
        render_status_bar(frame, app, chunks[1]);
    }
}

/// Rows available for chapter text inside a pane of `area_height` rows
pub fn viewport_height(area_height: u16, show_status: bool) -> usize {
    let status = if show_status { 1 } else { 0 };
    // -2 for the pane borders
    area_height.saturating_sub(2 + status) as usize
}

fn render_chapter(frame: &mut Frame, app: &mut App, area: Rect) {
    let text_width = app.text_width_for(area.width);
    let title = format!(" {} ", app.current_chapter().title());

    // Center the text column when the pane is wider than the configured width
    let inner_width = area.width.saturating_sub(2);
    let pad = inner_width.saturating_sub(text_width) / 2;
    let column = Rect {
        x: area.x + pad,
        width: (text_width + 2).min(area.width),
        ..area
    };

    let scroll = app.scroll;
    let height = area.height.saturating_sub(2) as usize;
    let visible: Vec<Line> = app
        .rendered_lines(text_width)
        .iter()
        .skip(scroll)
        .take(height)
        .cloned()
        .collect();

    let paragraph = Paragraph::new(visible)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border))
                .title(title),
        )
        .style(app.theme.base);

    frame.render_widget(paragraph, column);
}

fn render_status_bar(frame: &mut Frame, app: &mut App, area: Rect) {
    let title = app.current_chapter().title();
    let nav = app.nav();
    let total = app.chapters.len();
    let line_count = app.line_count();
    let percent = if line_count == 0 {
        100
    } else {
        ((app.scroll + 1) * 100 / line_count).min(100)
    };

    let theme_str = match app.theme_variant {
        quill_core::config::ThemeVariant::Dark => "DARK",
        quill_core::config::ThemeVariant::Light => "LIGHT",
    };

    #[cfg(feature = "watch")]
    let watch_str = if app.watcher.is_some() {
        if app.current_chapter().dirty_on_disk {
            "  [DIRTY]"
        } else {
            "  [WATCH]"
        }
    } else {
        ""
    };
    #[cfg(not(feature = "watch"))]
    let watch_str = "";

    let status_text = format!(
        " quill  {}  chapter {}/{}  {}%  [{}]{}",
        title, nav.current, total, percent, theme_str, watch_str
    );

    let bar_style = Style::default()
        .fg(app.theme.status_bar_fg)
        .bg(app.theme.status_bar_bg)
        .add_modifier(Modifier::BOLD);

    let mut spans = vec![Span::styled(status_text, bar_style)];
    if let Some(ref message) = app.status_message {
        spans.push(Span::styled(format!("  {}", message), app.theme.status_message));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(bar_style), area);
}
