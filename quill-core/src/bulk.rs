//! Bulk chapter import
//!
//! Splits one pasted blob into chapter drafts. The first line of every piece
//! becomes the chapter title, the rest its content.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

use crate::markup::HEADING_MARKER;

/// Separator suggested when the user has not chosen one
pub const DEFAULT_SEPARATOR: &str = "_________________";

/// Number of content chars shown in a preview
pub const PREVIEW_CHARS: usize = 100;

/// One chapter cut out of a bulk paste
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChapterDraft {
    pub number: u32,
    pub title: String,
    pub content: String,
    pub preview: String,
}

impl ChapterDraft {
    /// Chapter text as stored on disk: the title as a heading, then the content
    pub fn to_markup(&self) -> String {
        if self.content.is_empty() {
            format!("{}{}\n", HEADING_MARKER, self.title)
        } else {
            format!("{}{}\n{}\n", HEADING_MARKER, self.title, self.content)
        }
    }

    /// File name the draft is written under
    pub fn file_name(&self) -> String {
        format!("{:03}.txt", self.number)
    }
}

/// Split `content` into chapters numbered from `start_number`.
///
/// Unlike the markup parser, blank pieces are dropped here.
pub fn split_chapters(content: &str, separator: &str, start_number: u32) -> Result<Vec<ChapterDraft>> {
    if content.trim().is_empty() {
        bail!("Please enter chapter content");
    }
    if separator.is_empty() {
        bail!("Separator must not be empty");
    }

    let drafts: Vec<ChapterDraft> = content
        .split(separator)
        .filter(|piece| !piece.trim().is_empty())
        .zip(start_number..)
        .map(|(piece, number)| draft_from_piece(piece, number))
        .collect();

    if drafts.is_empty() {
        bail!("No chapters found. Check if separator is correct.");
    }

    log::info!("split bulk import into {} chapters", drafts.len());
    Ok(drafts)
}

fn draft_from_piece(piece: &str, number: u32) -> ChapterDraft {
    let mut lines = piece.trim().split('\n');

    let title = match lines.next().map(str::trim) {
        Some(first) if !first.is_empty() => first.to_string(),
        _ => format!("Chapter {}", number),
    };
    let content = lines.collect::<Vec<_>>().join("\n").trim().to_string();
    let preview = make_preview(&content);

    ChapterDraft {
        number,
        title,
        content,
        preview,
    }
}

fn make_preview(content: &str) -> String {
    let mut preview: String = content.chars().take(PREVIEW_CHARS).collect();
    if content.chars().count() > PREVIEW_CHARS {
        preview.push_str("...");
    }
    preview
}

/// How an upload pass over the drafts went
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImportOutcome {
    AllSucceeded,
    Partial,
    AllFailed,
}

/// Tally of per-chapter upload results
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportReport {
    pub succeeded: usize,
    pub failed: Vec<u32>,
}

impl ImportReport {
    /// Build a report from `(chapter number, succeeded)` pairs
    pub fn from_results(results: &[(u32, bool)]) -> Self {
        let succeeded = results.iter().filter(|(_, ok)| *ok).count();
        let failed = results
            .iter()
            .filter(|(_, ok)| !*ok)
            .map(|(number, _)| *number)
            .collect();
        Self { succeeded, failed }
    }

    pub fn outcome(&self) -> ImportOutcome {
        if self.failed.is_empty() {
            ImportOutcome::AllSucceeded
        } else if self.succeeded > 0 {
            ImportOutcome::Partial
        } else {
            ImportOutcome::AllFailed
        }
    }

    pub fn message(&self) -> String {
        match self.outcome() {
            ImportOutcome::AllSucceeded => format!("Successfully created {} chapters", self.succeeded),
            ImportOutcome::Partial => format!(
                "Created {} chapters but {} failed",
                self.succeeded,
                self.failed.len()
            ),
            ImportOutcome::AllFailed => "Failed to create all chapters".to_string(),
        }
    }
}

/// Write every draft into `dir`, carrying on past chapters that fail.
///
/// Only a missing, uncreatable directory is an error; per-chapter failures
/// end up in the report.
pub fn write_drafts(drafts: &[ChapterDraft], dir: &Path) -> Result<ImportReport> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let results: Vec<(u32, bool)> = drafts
        .iter()
        .map(|draft| {
            let path = dir.join(draft.file_name());
            match fs::write(&path, draft.to_markup()) {
                Ok(()) => (draft.number, true),
                Err(e) => {
                    log::warn!("failed to write chapter {}: {}", path.display(), e);
                    (draft.number, false)
                }
            }
        })
        .collect();

    Ok(ImportReport::from_results(&results))
}
