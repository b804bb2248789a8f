//! Rendering of chapter nodes into terminal lines, with an LRU cache

use crate::theme::Theme;
use quill_core::config::ThemeVariant;
use quill_core::render::RenderNode;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use std::num::NonZeroUsize;
use unicode_width::UnicodeWidthStr;

const DIVIDER_GLYPH: &str = "─";
const CACHE_ENTRIES: usize = 32;

/// Key for render cache
#[derive(Hash, PartialEq, Eq, Clone, Debug)]
pub struct RenderKey {
    pub chapter: usize,
    pub rev: u64,
    pub width: u16,
    pub theme: ThemeVariant,
}

/// Rendered chapter output
#[derive(Clone)]
pub struct RenderedChapter {
    pub lines: Vec<Line<'static>>,
}

/// LRU cache for rendered chapters
pub struct RendererCache {
    cache: lru::LruCache<RenderKey, RenderedChapter>,
}

impl RendererCache {
    pub fn new() -> Self {
        let capacity = NonZeroUsize::new(CACHE_ENTRIES).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: lru::LruCache::new(capacity),
        }
    }

    pub fn get(&mut self, key: &RenderKey) -> Option<&RenderedChapter> {
        self.cache.get(key)
    }

    pub fn put(&mut self, key: RenderKey, chapter: RenderedChapter) {
        self.cache.put(key, chapter);
    }
}

impl Default for RendererCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Lay out nodes as terminal lines wrapped to `width` columns.
///
/// Each heading and paragraph is followed by a blank line, so adjacent
/// paragraphs stay visually separate.
pub fn render_lines(nodes: &[RenderNode], theme: &Theme, width: u16) -> Vec<Line<'static>> {
    let width = usize::from(width.max(1));
    let mut lines = Vec::new();

    for node in nodes {
        match node {
            RenderNode::Divider => {
                let rule = DIVIDER_GLYPH.repeat((width / 3).max(1));
                lines.push(Line::styled(rule, theme.divider).centered());
                lines.push(Line::default());
            }
            RenderNode::Heading(spans) => {
                let styled: Vec<(String, Style)> = spans
                    .iter()
                    .map(|span| (span.text.clone(), theme.heading_span(span.style)))
                    .collect();
                lines.extend(wrap_spans(&styled, width));
                lines.push(Line::default());
            }
            RenderNode::Paragraph(spans) => {
                let styled: Vec<(String, Style)> = spans
                    .iter()
                    .map(|span| (span.text.clone(), theme.paragraph_span(span.style)))
                    .collect();
                lines.extend(wrap_spans(&styled, width));
                lines.push(Line::default());
            }
        }
    }

    lines
}

/// Greedy word wrap across styled runs; words wider than the line are split
fn wrap_spans(runs: &[(String, Style)], width: usize) -> Vec<Line<'static>> {
    let mut lines: Vec<Vec<Span<'static>>> = vec![Vec::new()];
    let mut used = 0;

    for (text, style) in runs {
        for word in text.split_inclusive(' ') {
            let visible = word.trim_end_matches(' ').width();
            if used > 0 && used + visible > width {
                lines.push(Vec::new());
                used = 0;
            }

            let mut rest = word;
            while used == 0 && rest.trim_end_matches(' ').width() > width {
                let cut = split_at_width(rest, width);
                if let Some(line) = lines.last_mut() {
                    line.push(Span::styled(rest[..cut].to_string(), *style));
                }
                lines.push(Vec::new());
                rest = &rest[cut..];
            }

            if !rest.is_empty() {
                if let Some(line) = lines.last_mut() {
                    line.push(Span::styled(rest.to_string(), *style));
                }
                used += rest.width();
            }
        }
    }

    lines.into_iter().map(Line::from).collect()
}

/// Byte index of the longest prefix that fits in `width` columns (at least one char)
fn split_at_width(text: &str, width: usize) -> usize {
    let mut used = 0;
    for (idx, ch) in text.char_indices() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + ch_width > width {
            return if idx == 0 { ch.len_utf8() } else { idx };
        }
        used += ch_width;
    }
    text.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::{markup, render};
    use ratatui::style::Modifier;

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    fn render_text(text: &str, width: u16) -> Vec<Line<'static>> {
        let nodes = render::render(&markup::parse(text));
        render_lines(&nodes, &Theme::dark(), width)
    }

    #[test]
    fn test_paragraphs_are_separated() {
        let lines = render_text("one\ntwo", 40);
        let texts: Vec<String> = lines.iter().map(line_text).collect();
        assert_eq!(texts, vec!["one", "", "two", ""]);
    }

    #[test]
    fn test_divider_line() {
        let lines = render_text("a\n---\nb", 30);
        assert_eq!(lines.len(), 6);
        assert_eq!(line_text(&lines[2]), DIVIDER_GLYPH.repeat(10));
    }

    #[test]
    fn test_inline_styles_map_to_modifiers() {
        let lines = render_text("x **b** *i* <u>u</u>", 40);
        let spans = &lines[0].spans;
        let bold = spans.iter().find(|s| s.content == "b").map(|s| s.style);
        let italic = spans.iter().find(|s| s.content == "i").map(|s| s.style);
        let underline = spans.iter().find(|s| s.content == "u").map(|s| s.style);

        assert!(bold.is_some_and(|s| s.add_modifier.contains(Modifier::BOLD)));
        assert!(italic.is_some_and(|s| s.add_modifier.contains(Modifier::ITALIC)));
        assert!(underline.is_some_and(|s| s.add_modifier.contains(Modifier::UNDERLINED)));
    }

    #[test]
    fn test_heading_uses_heading_style() {
        let theme = Theme::dark();
        let lines = render_text("### Title", 40);
        assert_eq!(line_text(&lines[0]), "Title");
        assert_eq!(lines[0].spans[0].style, theme.heading);
    }

    #[test]
    fn test_wraps_at_word_boundaries() {
        let lines = render_text("alpha beta gamma", 11);
        let texts: Vec<String> = lines.iter().map(line_text).collect();
        assert_eq!(texts, vec!["alpha beta ", "gamma", ""]);
    }

    #[test]
    fn test_long_word_is_split() {
        let lines = render_text("abcdefghij", 4);
        let texts: Vec<String> = lines.iter().map(line_text).collect();
        assert_eq!(texts, vec!["abcd", "efgh", "ij", ""]);
    }

    #[test]
    fn test_cache_round_trip() {
        let mut cache = RendererCache::new();
        let key = RenderKey {
            chapter: 0,
            rev: 1,
            width: 80,
            theme: ThemeVariant::Dark,
        };
        assert!(cache.get(&key).is_none());

        cache.put(key.clone(), RenderedChapter { lines: vec![Line::from("x")] });
        assert_eq!(cache.get(&key).map(|r| r.lines.len()), Some(1));
    }
}
