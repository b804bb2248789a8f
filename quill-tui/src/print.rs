//! Printing rendered chapters to a plain output stream

use anyhow::Result;
use crossterm::style::{Attribute, Stylize};
use quill_core::render::{InlineStyle, RenderNode, StyledText};
use std::io::Write;

const PLAIN_DIVIDER: &str = "* * *";

/// Write nodes to `out`, one block per line with a blank line between blocks.
///
/// With `plain` set no escape sequences are emitted.
pub fn print_nodes(nodes: &[RenderNode], plain: bool, out: &mut impl Write) -> Result<()> {
    for (idx, node) in nodes.iter().enumerate() {
        if idx > 0 {
            writeln!(out)?;
        }

        match node {
            RenderNode::Divider => {
                if plain {
                    writeln!(out, "{}", PLAIN_DIVIDER)?;
                } else {
                    writeln!(out, "{}", PLAIN_DIVIDER.dim())?;
                }
            }
            RenderNode::Heading(spans) => {
                write_spans(spans, plain, true, out)?;
                writeln!(out)?;
            }
            RenderNode::Paragraph(spans) => {
                write_spans(spans, plain, false, out)?;
                writeln!(out)?;
            }
        }
    }

    out.flush()?;
    Ok(())
}

fn write_spans(spans: &[StyledText], plain: bool, heading: bool, out: &mut impl Write) -> Result<()> {
    for span in spans {
        if plain {
            write!(out, "{}", span.text)?;
            continue;
        }

        let mut styled = span.text.as_str().stylize();
        if heading {
            styled = styled.attribute(Attribute::Bold);
        }
        styled = match span.style {
            InlineStyle::Plain => styled,
            InlineStyle::Bold => styled.attribute(Attribute::Bold),
            InlineStyle::Italic => styled.attribute(Attribute::Italic),
            InlineStyle::Underline => styled.attribute(Attribute::Underlined),
        };
        write!(out, "{}", styled)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::{markup, render};

    fn print_to_string(text: &str, plain: bool) -> Result<String> {
        let nodes = render::render(&markup::parse(text));
        let mut out = Vec::new();
        print_nodes(&nodes, plain, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_plain_output() -> Result<()> {
        let output = print_to_string("### Start\nA **b** c\n---\nEnd", true)?;
        assert_eq!(output, "Start\n\nA b c\n\n* * *\n\nEnd\n");
        Ok(())
    }

    #[test]
    fn test_styled_output_has_escapes() -> Result<()> {
        let output = print_to_string("*slanted*", false)?;
        assert!(output.contains("slanted"));
        assert!(output.contains('\u{1b}'));
        Ok(())
    }

    #[test]
    fn test_empty_document_prints_nothing() -> Result<()> {
        assert_eq!(print_to_string("", true)?, "");
        Ok(())
    }
}
