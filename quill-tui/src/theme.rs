//! Theme system for dark/light modes

use quill_core::config::ThemeVariant;
use quill_core::render::InlineStyle;
use ratatui::style::{Color, Modifier, Style};

/// Theme definition
#[derive(Clone, Debug)]
pub struct Theme {
    pub base: Style,
    pub heading: Style,
    pub divider: Style,
    pub border: Color,
    pub status_bar_fg: Color,
    pub status_bar_bg: Color,
    pub status_message: Style,
}

impl Theme {
    /// Create a theme for the given variant
    pub fn for_variant(variant: ThemeVariant) -> Self {
        match variant {
            ThemeVariant::Dark => Self::dark(),
            ThemeVariant::Light => Self::light(),
        }
    }

    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            base: Style::default().fg(Color::White),
            heading: Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
            divider: Style::default().fg(Color::DarkGray),
            border: Color::DarkGray,
            status_bar_fg: Color::Black,
            status_bar_bg: Color::LightBlue,
            status_message: Style::default().fg(Color::LightYellow),
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            base: Style::default().fg(Color::Black),
            heading: Style::default()
                .fg(Color::Rgb(150, 100, 0)) // Dark yellow
                .add_modifier(Modifier::BOLD),
            divider: Style::default().fg(Color::Gray),
            border: Color::Gray,
            status_bar_fg: Color::White,
            status_bar_bg: Color::Blue,
            status_message: Style::default().fg(Color::Magenta),
        }
    }

    /// Style for a paragraph span
    pub fn paragraph_span(&self, style: InlineStyle) -> Style {
        self.base.add_modifier(modifier_for(style))
    }

    /// Style for a heading span; headings keep their own weight and color
    pub fn heading_span(&self, style: InlineStyle) -> Style {
        self.heading.add_modifier(modifier_for(style))
    }
}

/// Text decoration for an inline style
pub fn modifier_for(style: InlineStyle) -> Modifier {
    match style {
        InlineStyle::Plain => Modifier::empty(),
        InlineStyle::Bold => Modifier::BOLD,
        InlineStyle::Italic => Modifier::ITALIC,
        InlineStyle::Underline => Modifier::UNDERLINED,
    }
}
