//! Selection-splicing editor model
//!
//! An [`EditingSession`] owns the text of one authoring surface and the
//! current selection. Toolbar actions splice markup around the selection and
//! re-select the original text. Offsets count chars, not bytes.

use crate::markup::{
    BOLD_DELIMITER, HEADING_MARKER, ITALIC_DELIMITER, SECTION_SEPARATOR, UNDERLINE_CLOSE,
    UNDERLINE_OPEN,
};
use anyhow::{ensure, Result};
use ropey::Rope;
use std::ops::Range;

/// Inline formats offered by the toolbar
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    Bold,
    Italic,
    Underline,
}

impl Format {
    /// (prefix, suffix) spliced around the selection
    pub fn delimiters(self) -> (&'static str, &'static str) {
        match self {
            Format::Bold => (BOLD_DELIMITER, BOLD_DELIMITER),
            Format::Italic => (ITALIC_DELIMITER, ITALIC_DELIMITER),
            Format::Underline => (UNDERLINE_OPEN, UNDERLINE_CLOSE),
        }
    }
}

/// Pressed state of the toolbar format buttons.
///
/// Flipped on every use of the matching button and never derived from the
/// buffer, so it can disagree with the text around the cursor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ToolbarState {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl ToolbarState {
    pub fn is_active(&self, format: Format) -> bool {
        match format {
            Format::Bold => self.bold,
            Format::Italic => self.italic,
            Format::Underline => self.underline,
        }
    }

    fn flip(&mut self, format: Format) {
        let flag = match format {
            Format::Bold => &mut self.bold,
            Format::Italic => &mut self.italic,
            Format::Underline => &mut self.underline,
        };
        *flag = !*flag;
    }
}

/// Text buffer plus selection for one editing surface
#[derive(Clone, Debug)]
pub struct EditingSession {
    rope: Rope,
    selection: Range<usize>,
    toolbar: ToolbarState,
}

impl EditingSession {
    /// Create a session with the cursor at the end of `text`
    pub fn new(text: &str) -> Self {
        let rope = Rope::from_str(text);
        let end = rope.len_chars();
        Self {
            rope,
            selection: end..end,
            toolbar: ToolbarState::default(),
        }
    }

    /// Create a session with an explicit selection.
    ///
    /// # Panics
    ///
    /// Panics if `start > end` or `end` is past the end of `text`.
    pub fn with_selection(text: &str, start: usize, end: usize) -> Self {
        let mut session = Self::new(text);
        session.set_selection(start, end);
        session
    }

    /// Like [`EditingSession::with_selection`], but out-of-range bounds
    /// coming from user input are an error instead of a panic
    pub fn try_with_selection(text: &str, start: usize, end: usize) -> Result<Self> {
        let mut session = Self::new(text);
        let len = session.len_chars();
        ensure!(
            start <= end && end <= len,
            "Selection {}..{} is outside the text ({} chars)",
            start,
            end,
            len
        );
        session.selection = start..end;
        Ok(session)
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn selection(&self) -> Range<usize> {
        self.selection.clone()
    }

    pub fn selected_text(&self) -> String {
        self.rope.slice(self.selection.clone()).to_string()
    }

    pub fn toolbar(&self) -> ToolbarState {
        self.toolbar
    }

    /// Set the selection supplied by the text surface.
    ///
    /// # Panics
    ///
    /// Panics if `start > end` or `end > len_chars()`; the caller owns the
    /// bounds, so a violation is a bug on its side.
    pub fn set_selection(&mut self, start: usize, end: usize) {
        assert!(
            start <= end && end <= self.rope.len_chars(),
            "selection {}..{} outside buffer of {} chars",
            start,
            end,
            self.rope.len_chars()
        );
        self.selection = start..end;
    }

    /// Replace the whole buffer, clamping the selection into it
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        let len = self.rope.len_chars();
        let end = self.selection.end.min(len);
        let start = self.selection.start.min(end);
        self.selection = start..end;
    }

    /// Splice `prefix` and `suffix` around the selection and re-select the
    /// original text between them.
    ///
    /// Existing delimiters are not inspected: wrapping twice nests.
    pub fn wrap_selection(&mut self, prefix: &str, suffix: &str) {
        let Range { start, end } = self.selection.clone();

        self.rope.insert(end, suffix);
        self.rope.insert(start, prefix);

        let inner_start = start + prefix.chars().count();
        self.selection = inner_start..inner_start + (end - start);
        log::debug!(
            "wrapped {}..{} with {:?}/{:?}, selection now {:?}",
            start,
            end,
            prefix,
            suffix,
            self.selection
        );
    }

    /// Apply an inline format and flip its toolbar button
    pub fn apply(&mut self, format: Format) {
        let (prefix, suffix) = format.delimiters();
        self.wrap_selection(prefix, suffix);
        self.toolbar.flip(format);
    }

    pub fn bold(&mut self) {
        self.apply(Format::Bold);
    }

    pub fn italic(&mut self) {
        self.apply(Format::Italic);
    }

    pub fn underline(&mut self) {
        self.apply(Format::Underline);
    }

    /// Put the selection on its own heading line
    pub fn insert_heading(&mut self) {
        let prefix = format!("\n{}", HEADING_MARKER);
        self.wrap_selection(&prefix, "\n");
    }

    /// Insert a section separator at the cursor (the selection end).
    ///
    /// Selected text is left as is; the selection collapses to just after the
    /// separator.
    pub fn insert_divider(&mut self) {
        let at = self.selection.end;
        self.rope.insert(at, SECTION_SEPARATOR);
        let cursor = at + SECTION_SEPARATOR.chars().count();
        self.selection = cursor..cursor;
    }
}
