//! Mapping from a parsed document to renderable nodes
//!
//! The output is backend-neutral: the terminal reader and the stdout printer
//! both consume the same node list and pick their own styling for it.

use crate::markup::{Block, Document, InlineSpan};

/// Inline styling of a text run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InlineStyle {
    Plain,
    Bold,
    Italic,
    Underline,
}

/// A run of text with exactly one style
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyledText {
    pub text: String,
    pub style: InlineStyle,
}

impl From<&InlineSpan> for StyledText {
    fn from(span: &InlineSpan) -> Self {
        let style = match span {
            InlineSpan::Plain(_) => InlineStyle::Plain,
            InlineSpan::Bold(_) => InlineStyle::Bold,
            InlineSpan::Italic(_) => InlineStyle::Italic,
            InlineSpan::Underline(_) => InlineStyle::Underline,
        };
        Self {
            text: span.text().to_string(),
            style,
        }
    }
}

/// One block-level element of rendered output
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderNode {
    /// Visual break between two sections
    Divider,
    /// Emphasized standalone line
    Heading(Vec<StyledText>),
    /// One paragraph per source line
    Paragraph(Vec<StyledText>),
}

impl RenderNode {
    pub fn spans(&self) -> &[StyledText] {
        match self {
            RenderNode::Divider => &[],
            RenderNode::Heading(spans) | RenderNode::Paragraph(spans) => spans,
        }
    }

    /// Visible text with all styling dropped
    pub fn plain_text(&self) -> String {
        self.spans().iter().map(|span| span.text.as_str()).collect()
    }
}

/// Render a document into an ordered node list.
///
/// Every section after the first is preceded by a divider, including empty
/// sections.
pub fn render(doc: &Document) -> Vec<RenderNode> {
    let mut nodes = Vec::new();

    for (idx, section) in doc.sections.iter().enumerate() {
        if idx > 0 {
            nodes.push(RenderNode::Divider);
        }

        nodes.extend(section.blocks.iter().map(|block| match block {
            Block::Heading { text } => RenderNode::Heading(text.iter().map(StyledText::from).collect()),
            Block::Paragraph { text } => RenderNode::Paragraph(text.iter().map(StyledText::from).collect()),
        }));
    }

    nodes
}
