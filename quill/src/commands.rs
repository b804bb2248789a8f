//! Command bodies for `apply` and `split`, kept apart from argument parsing

use anyhow::{Context, Result};
use clap::ValueEnum;
use quill_core::bulk::{self, ImportReport};
use quill_core::{EditingSession, Format};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Toolbar action requested on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Action {
    Bold,
    Italic,
    Underline,
    Heading,
    Divider,
}

/// Run one toolbar action over `start..end` of `text` and return the new text
pub fn apply_action(text: &str, action: Action, start: usize, end: usize) -> Result<String> {
    let mut session = EditingSession::try_with_selection(text, start, end)?;
    match action {
        Action::Bold => session.apply(Format::Bold),
        Action::Italic => session.apply(Format::Italic),
        Action::Underline => session.apply(Format::Underline),
        Action::Heading => session.insert_heading(),
        Action::Divider => session.insert_divider(),
    }

    let selection = session.selection();
    log::info!("selection after {:?}: {}..{}", action, selection.start, selection.end);
    Ok(session.text())
}

/// Print a preview of every chapter in `file` and, given `out_dir`, write them out.
///
/// Returns the write report when chapters were written.
pub fn split_file(
    file: &Path,
    separator: &str,
    start_number: u32,
    out_dir: Option<&Path>,
    out: &mut impl Write,
) -> Result<Option<ImportReport>> {
    let content = fs::read_to_string(file)
        .with_context(|| format!("Failed to read file: {}", file.display()))?;
    let drafts = bulk::split_chapters(&content, separator, start_number)?;

    for draft in &drafts {
        writeln!(out, "{:>4}  {}", draft.number, draft.title)?;
        writeln!(out, "      {}", draft.preview.replace('\n', " "))?;
    }
    writeln!(out, "Found {} chapters", drafts.len())?;

    let Some(dir) = out_dir else {
        return Ok(None);
    };

    let report = bulk::write_drafts(&drafts, dir)?;
    writeln!(out, "{}", report.message())?;
    Ok(Some(report))
}
