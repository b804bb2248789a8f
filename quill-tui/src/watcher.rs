//! Watching the open chapter for changes made outside the reader

use anyhow::{Context, Result};
use crossbeam_channel::{Receiver, Sender};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Debounce applied by the reader loop
pub const DEBOUNCE_MS: u64 = 250;

/// Watches one chapter file at a time; switching chapters retargets it
pub struct ChapterWatcher {
    watcher: RecommendedWatcher,
    receiver: Receiver<PathBuf>,
    target: Arc<Mutex<PathBuf>>,
    watched_dir: Option<PathBuf>,
    last_event: Option<Instant>,
}

impl ChapterWatcher {
    /// Start watching `path`
    pub fn new(path: &Path) -> Result<Self> {
        let (tx, rx) = crossbeam_channel::unbounded();
        let target = Arc::new(Mutex::new(path.to_path_buf()));

        let watcher = notify::recommended_watcher(event_handler(tx, Arc::clone(&target)))
            .context("Failed to create file watcher")?;

        let mut chapter_watcher = Self {
            watcher,
            receiver: rx,
            target,
            watched_dir: None,
            last_event: None,
        };
        chapter_watcher.watch_dir_of(path)?;

        Ok(chapter_watcher)
    }

    /// Point the watcher at another chapter, dropping any pending change
    pub fn retarget(&mut self, path: &Path) -> Result<()> {
        if let Ok(mut target) = self.target.lock() {
            *target = path.to_path_buf();
        }
        self.watch_dir_of(path)?;

        while self.receiver.try_recv().is_ok() {}
        self.last_event = None;
        Ok(())
    }

    // The parent directory is watched rather than the file so that editors
    // saving through a rename are still seen.
    fn watch_dir_of(&mut self, path: &Path) -> Result<()> {
        let dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        if self.watched_dir.as_deref() == Some(dir.as_path()) {
            return Ok(());
        }

        if let Some(old) = self.watched_dir.take() {
            if let Err(e) = self.watcher.unwatch(&old) {
                log::warn!("failed to unwatch {}: {}", old.display(), e);
            }
        }

        self.watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch directory: {}", dir.display()))?;
        self.watched_dir = Some(dir);
        Ok(())
    }

    /// Returns true once a change has been seen and `debounce_ms` has passed
    /// without further changes
    pub fn check_changed(&mut self, debounce_ms: u64) -> bool {
        while self.receiver.try_recv().is_ok() {
            self.last_event = Some(Instant::now());
        }

        match self.last_event {
            Some(last) if last.elapsed() >= Duration::from_millis(debounce_ms) => {
                self.last_event = None;
                true
            }
            _ => false,
        }
    }

    /// Get the watched chapter path
    pub fn path(&self) -> PathBuf {
        self.target
            .lock()
            .map(|target| target.clone())
            .unwrap_or_default()
    }
}

fn event_handler(
    tx: Sender<PathBuf>,
    target: Arc<Mutex<PathBuf>>,
) -> impl FnMut(notify::Result<Event>) + Send + 'static {
    move |res| {
        let Ok(event) = res else {
            return;
        };
        if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
            return;
        }
        let Ok(target) = target.lock() else {
            return;
        };
        if event.paths.iter().any(|p| p == &*target) {
            let _ = tx.send(target.clone());
        }
    }
}
