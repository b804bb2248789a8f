//! Chapters stored as text files, and chapter navigation

use anyhow::{Context, Result};
use ropey::Rope;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::markup::{self, Document};

/// A chapter loaded from disk
#[derive(Clone)]
pub struct ChapterFile {
    pub path: PathBuf,
    pub rope: Rope,
    pub document: Document,
    pub loaded_mtime: Option<SystemTime>,
    pub disk_mtime: Option<SystemTime>,
    pub dirty_on_disk: bool,
    pub rev: u64,
}

impl ChapterFile {
    /// Load a chapter from a file path
    pub fn load(path: &Path) -> Result<Self> {
        let abs_path = path
            .canonicalize()
            .with_context(|| format!("Failed to canonicalize path: {}", path.display()))?;

        let content = fs::read_to_string(&abs_path)
            .with_context(|| format!("Failed to read chapter: {}", abs_path.display()))?;

        let document = markup::parse(&content);
        let rope = Rope::from_str(&content);
        let mtime = modified_time(&abs_path);

        log::debug!(
            "loaded {} ({} sections)",
            abs_path.display(),
            document.sections.len()
        );

        Ok(Self {
            path: abs_path,
            rope,
            document,
            loaded_mtime: mtime,
            disk_mtime: mtime,
            dirty_on_disk: false,
            rev: 1,
        })
    }

    /// Reload the chapter from disk
    pub fn reload(&mut self) -> Result<()> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to reload chapter: {}", self.path.display()))?;

        self.document = markup::parse(&content);
        self.rope = Rope::from_str(&content);

        let mtime = modified_time(&self.path);
        self.loaded_mtime = mtime;
        self.disk_mtime = mtime;
        self.dirty_on_disk = false;
        self.rev += 1;

        Ok(())
    }

    /// Write new raw text to disk and pick it up
    pub fn save_text(&mut self, text: &str) -> Result<()> {
        fs::write(&self.path, text)
            .with_context(|| format!("Failed to write chapter: {}", self.path.display()))?;
        self.reload()
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Display title: the first heading, else the file stem
    pub fn title(&self) -> String {
        if let Some(heading) = self.document.headings().into_iter().find(|h| !h.trim().is_empty()) {
            return heading;
        }
        self.path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "untitled".to_string())
    }

    /// Number of lines in the raw text
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }
}

fn modified_time(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).ok().and_then(|m| m.modified().ok())
}

/// Previous/next chapter numbers around the current one
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChapterNav {
    pub current: u32,
    pub prev: Option<u32>,
    pub next: Option<u32>,
}

impl ChapterNav {
    /// Numbers are 1-based; `available` may be empty while the list is loading
    pub fn new(current: u32, available: &[u32]) -> Self {
        let prev = (current > 1).then(|| current - 1);
        let next = available
            .iter()
            .max()
            .filter(|&&last| current < last)
            .map(|_| current + 1);
        Self { current, prev, next }
    }
}
