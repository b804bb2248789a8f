//! Story markup model and parser
//!
//! Chapter content and story summaries use a small line-oriented format:
//!
//! - `"\n---\n"` separates sections
//! - a line starting with `"### "` is a heading
//! - every other non-blank line is its own paragraph
//! - inline `**bold**`, `*italic*` and `<u>underline</u>` runs, never nested
//!
//! Parsing is total: anything that does not form a complete token stays plain text.

/// Literal text separating two sections
pub const SECTION_SEPARATOR: &str = "\n---\n";

/// Prefix marking a heading line
pub const HEADING_MARKER: &str = "### ";

pub const BOLD_DELIMITER: &str = "**";
pub const ITALIC_DELIMITER: &str = "*";
pub const UNDERLINE_OPEN: &str = "<u>";
pub const UNDERLINE_CLOSE: &str = "</u>";

/// A flat run of inline spans making up one line of text
pub type InlineRun = Vec<InlineSpan>;

/// A styled or plain run of text within a line
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InlineSpan {
    Plain(String),
    Bold(String),
    Italic(String),
    Underline(String),
}

impl InlineSpan {
    /// The visible text of the span, without delimiters
    pub fn text(&self) -> &str {
        match self {
            InlineSpan::Plain(text)
            | InlineSpan::Bold(text)
            | InlineSpan::Italic(text)
            | InlineSpan::Underline(text) => text,
        }
    }
}

/// A heading or paragraph, one per qualifying source line
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    Heading { text: InlineRun },
    Paragraph { text: InlineRun },
}

impl Block {
    pub fn text(&self) -> &InlineRun {
        match self {
            Block::Heading { text } | Block::Paragraph { text } => text,
        }
    }

    pub fn is_heading(&self) -> bool {
        matches!(self, Block::Heading { .. })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Section {
    pub blocks: Vec<Block>,
}

/// Parsed form of a chapter or summary
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    pub sections: Vec<Section>,
}

impl Document {
    /// Iterate over all blocks across sections in source order
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.sections.iter().flat_map(|section| section.blocks.iter())
    }

    /// Visible text of every heading, in order
    pub fn headings(&self) -> Vec<String> {
        self.blocks()
            .filter(|block| block.is_heading())
            .map(|block| plain_text(block.text()))
            .collect()
    }

    /// True when no section produced any block
    pub fn is_blank(&self) -> bool {
        self.blocks().next().is_none()
    }
}

/// Concatenate the visible text of a run
pub fn plain_text(run: &[InlineSpan]) -> String {
    run.iter().map(InlineSpan::text).collect()
}

/// Parse raw markup into a document.
///
/// Sections are never filtered, so an empty segment between two separators
/// (or the empty input itself) yields a section with no blocks.
pub fn parse(raw: &str) -> Document {
    let sections = raw.split(SECTION_SEPARATOR).map(parse_section).collect();
    Document { sections }
}

fn parse_section(source: &str) -> Section {
    let blocks = source.split('\n').filter_map(parse_line).collect();
    Section { blocks }
}

fn parse_line(line: &str) -> Option<Block> {
    if let Some(rest) = line.strip_prefix(HEADING_MARKER) {
        Some(Block::Heading {
            text: parse_inline(rest),
        })
    } else if line.trim().is_empty() {
        None
    } else {
        Some(Block::Paragraph {
            text: parse_inline(line),
        })
    }
}

/// Split one line into inline spans.
///
/// At every position bold is tried first, then underline, then italic, so a
/// doubled `**` is always taken as bold before a single `*` is considered.
pub fn parse_inline(line: &str) -> InlineRun {
    let mut spans = Vec::new();
    let mut plain_start = 0;
    let mut pos = 0;

    while pos < line.len() {
        let rest = &line[pos..];
        let token = scan_bold(rest)
            .map(|(len, text)| (len, InlineSpan::Bold(text.to_string())))
            .or_else(|| scan_underline(rest).map(|(len, text)| (len, InlineSpan::Underline(text.to_string()))))
            .or_else(|| scan_italic(rest).map(|(len, text)| (len, InlineSpan::Italic(text.to_string()))));

        match token {
            Some((len, span)) => {
                if plain_start < pos {
                    spans.push(InlineSpan::Plain(line[plain_start..pos].to_string()));
                }
                spans.push(span);
                pos += len;
                plain_start = pos;
            }
            None => {
                // Step a whole char so slices stay on boundaries
                pos += rest.chars().next().map_or(1, char::len_utf8);
            }
        }
    }

    if plain_start < line.len() {
        spans.push(InlineSpan::Plain(line[plain_start..].to_string()));
    }

    spans
}

/// `**content**` where content is the shortest non-empty run before the next `**`.
/// Content may hold a lone `*` but never starts or ends with one, so a run of
/// three stars opens bold one char later. Returns (bytes consumed, content).
fn scan_bold(rest: &str) -> Option<(usize, &str)> {
    let body = rest.strip_prefix(BOLD_DELIMITER)?;
    let first = body.chars().next()?.len_utf8();
    let close = first + body[first..].find(BOLD_DELIMITER)?;
    let content = &body[..close];
    if content.starts_with(ITALIC_DELIMITER) || content.ends_with(ITALIC_DELIMITER) {
        return None;
    }
    Some((2 * BOLD_DELIMITER.len() + content.len(), content))
}

/// `<u>content</u>` where content is non-empty and holds no `<`
fn scan_underline(rest: &str) -> Option<(usize, &str)> {
    let body = rest.strip_prefix(UNDERLINE_OPEN)?;
    let end = body.find('<')?;
    if end == 0 || !body[end..].starts_with(UNDERLINE_CLOSE) {
        return None;
    }
    let content = &body[..end];
    Some((UNDERLINE_OPEN.len() + content.len() + UNDERLINE_CLOSE.len(), content))
}

/// `*content*` where content is non-empty and holds no `*`
fn scan_italic(rest: &str) -> Option<(usize, &str)> {
    let body = rest.strip_prefix(ITALIC_DELIMITER)?;
    let end = body.find(ITALIC_DELIMITER)?;
    if end == 0 {
        return None;
    }
    let content = &body[..end];
    Some((2 * ITALIC_DELIMITER.len() + content.len(), content))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &str) -> InlineSpan {
        InlineSpan::Plain(text.to_string())
    }

    fn paragraph(spans: Vec<InlineSpan>) -> Block {
        Block::Paragraph { text: spans }
    }

    #[test]
    fn test_separator_splits_sections() {
        let doc = parse("A\n---\nB");
        assert_eq!(doc.sections.len(), 2);
        assert_eq!(doc.sections[0].blocks, vec![paragraph(vec![plain("A")])]);
        assert_eq!(doc.sections[1].blocks, vec![paragraph(vec![plain("B")])]);
    }

    #[test]
    fn test_heading_line() {
        let doc = parse("### Title\n");
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(
            doc.sections[0].blocks,
            vec![Block::Heading {
                text: vec![plain("Title")]
            }]
        );
    }

    #[test]
    fn test_heading_requires_space() {
        let doc = parse("###Title");
        assert_eq!(doc.sections[0].blocks, vec![paragraph(vec![plain("###Title")])]);
    }

    #[test]
    fn test_heading_with_inline_formatting() {
        let doc = parse("### The *long* night");
        assert_eq!(
            doc.sections[0].blocks,
            vec![Block::Heading {
                text: vec![
                    plain("The "),
                    InlineSpan::Italic("long".to_string()),
                    plain(" night"),
                ]
            }]
        );
        assert_eq!(doc.headings(), vec!["The long night".to_string()]);
    }

    #[test]
    fn test_each_line_is_its_own_paragraph() {
        let doc = parse("one\ntwo\n\n  \nthree");
        assert_eq!(
            doc.sections[0].blocks,
            vec![
                paragraph(vec![plain("one")]),
                paragraph(vec![plain("two")]),
                paragraph(vec![plain("three")]),
            ]
        );
    }

    #[test]
    fn test_paragraph_keeps_leading_whitespace() {
        let doc = parse("  indented");
        assert_eq!(doc.sections[0].blocks, vec![paragraph(vec![plain("  indented")])]);
    }

    #[test]
    fn test_empty_sections_are_kept() {
        let doc = parse("A\n---\n\n---\nB");
        assert_eq!(doc.sections.len(), 3);
        assert!(doc.sections[1].blocks.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let doc = parse("");
        assert_eq!(doc.sections, vec![Section::default()]);
        assert!(doc.is_blank());
    }

    #[test]
    fn test_separator_needs_surrounding_newlines() {
        let doc = parse("---\nA");
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].blocks.len(), 2);
    }

    #[test]
    fn test_bold_wins_over_italic() {
        assert_eq!(parse_inline("**a*b**"), vec![InlineSpan::Bold("a*b".to_string())]);
    }

    #[test]
    fn test_triple_star() {
        assert_eq!(
            parse_inline("***bold***"),
            vec![plain("*"), InlineSpan::Bold("bold".to_string()), plain("*")]
        );
        assert_eq!(
            parse_inline("a ***b*** c"),
            vec![plain("a *"), InlineSpan::Bold("b".to_string()), plain("* c")]
        );
    }

    #[test]
    fn test_italic() {
        assert_eq!(parse_inline("*x*"), vec![InlineSpan::Italic("x".to_string())]);
    }

    #[test]
    fn test_underline() {
        assert_eq!(
            parse_inline("a <u>b</u> c"),
            vec![plain("a "), InlineSpan::Underline("b".to_string()), plain(" c")]
        );
    }

    #[test]
    fn test_underline_content_cannot_hold_tags() {
        assert_eq!(parse_inline("<u>a<b</u>"), vec![plain("<u>a<b</u>")]);
    }

    #[test]
    fn test_unterminated_bold_is_plain() {
        assert_eq!(parse_inline("**unterminated"), vec![plain("**unterminated")]);
    }

    #[test]
    fn test_unterminated_italic_and_underline() {
        assert_eq!(parse_inline("*open"), vec![plain("*open")]);
        assert_eq!(parse_inline("<u>open"), vec![plain("<u>open")]);
    }

    #[test]
    fn test_empty_delimiters_are_plain() {
        assert_eq!(parse_inline("****"), vec![plain("****")]);
        assert_eq!(parse_inline("**"), vec![plain("**")]);
        assert_eq!(parse_inline("<u></u>"), vec![plain("<u></u>")]);
    }

    #[test]
    fn test_spans_are_flat() {
        assert_eq!(
            parse_inline("**bold *not italic***"),
            vec![InlineSpan::Bold("bold *not italic".to_string()), plain("*")]
        );
    }

    #[test]
    fn test_mixed_line() {
        assert_eq!(
            parse_inline("She said **no**, *twice*, and <u>left</u>."),
            vec![
                plain("She said "),
                InlineSpan::Bold("no".to_string()),
                plain(", "),
                InlineSpan::Italic("twice".to_string()),
                plain(", and "),
                InlineSpan::Underline("left".to_string()),
                plain("."),
            ]
        );
    }

    #[test]
    fn test_multibyte_text() {
        assert_eq!(
            parse_inline("Chương *một* — **hai**"),
            vec![
                plain("Chương "),
                InlineSpan::Italic("một".to_string()),
                plain(" — "),
                InlineSpan::Bold("hai".to_string()),
            ]
        );
    }

    #[test]
    fn test_plain_text_strips_markup() {
        let run = parse_inline("a **b** *c* <u>d</u>");
        assert_eq!(plain_text(&run), "a b c d");
    }
}
