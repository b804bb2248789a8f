//! Application state

use anyhow::{Context, Result};
use quill_core::config::ThemeVariant;
use quill_core::{ChapterFile, ChapterNav, Config};
use ratatui::text::Line;

use crate::render::{self, RenderKey, RenderedChapter, RendererCache};
use crate::theme::Theme;

#[cfg(feature = "watch")]
use crate::watcher::ChapterWatcher;

/// Main application state
pub struct App {
    pub config: Config,
    pub theme_variant: ThemeVariant,
    pub theme: Theme,
    pub chapters: Vec<ChapterFile>,
    /// Index into `chapters`
    pub current: usize,
    /// First rendered line shown
    pub scroll: usize,
    pub should_quit: bool,
    pub status_message: Option<String>,
    cache: RendererCache,
    text_width: u16,
    #[cfg(feature = "watch")]
    pub watcher: Option<ChapterWatcher>,
}

impl App {
    /// Create a reader over `chapters`, shown in the given order as 1..=N
    pub fn new(config: Config, chapters: Vec<ChapterFile>) -> Result<Self> {
        anyhow::ensure!(!chapters.is_empty(), "No chapters to read");

        let theme_variant = config.theme;

        #[cfg(feature = "watch")]
        let watcher = if config.watch.enabled {
            match ChapterWatcher::new(&chapters[0].path) {
                Ok(watcher) => Some(watcher),
                Err(e) => {
                    log::warn!("file watching disabled: {:#}", e);
                    None
                }
            }
        } else {
            None
        };

        Ok(Self {
            text_width: config.reader.width.max(1),
            config,
            theme_variant,
            theme: Theme::for_variant(theme_variant),
            chapters,
            current: 0,
            scroll: 0,
            should_quit: false,
            status_message: None,
            cache: RendererCache::new(),
            #[cfg(feature = "watch")]
            watcher,
        })
    }

    pub fn current_chapter(&self) -> &ChapterFile {
        &self.chapters[self.current]
    }

    /// Navigation state for the current chapter, numbered from 1
    pub fn nav(&self) -> ChapterNav {
        let available: Vec<u32> = (1..=self.chapters.len() as u32).collect();
        ChapterNav::new(self.current as u32 + 1, &available)
    }

    pub fn next_chapter(&mut self) {
        match self.nav().next {
            Some(number) => self.go_to_chapter(number as usize - 1),
            None => self.set_status_message("Last chapter"),
        }
    }

    pub fn prev_chapter(&mut self) {
        match self.nav().prev {
            Some(number) => self.go_to_chapter(number as usize - 1),
            None => self.set_status_message("First chapter"),
        }
    }

    fn go_to_chapter(&mut self, index: usize) {
        self.current = index;
        self.scroll = 0;

        #[cfg(feature = "watch")]
        if let Some(ref mut watcher) = self.watcher {
            if let Err(e) = watcher.retarget(&self.chapters[index].path) {
                log::warn!("failed to watch chapter: {:#}", e);
            }
        }
    }

    /// Width of the text column inside a pane of `pane_width` columns
    pub fn text_width_for(&self, pane_width: u16) -> u16 {
        let inner = pane_width.saturating_sub(2).max(1);
        match self.config.reader.width {
            0 => inner,
            max => inner.min(max),
        }
    }

    /// Rendered lines of the current chapter at `width`, cached per revision
    pub fn rendered_lines(&mut self, width: u16) -> &[Line<'static>] {
        self.text_width = width;
        let key = RenderKey {
            chapter: self.current,
            rev: self.chapters[self.current].rev,
            width,
            theme: self.theme_variant,
        };

        if self.cache.get(&key).is_none() {
            let nodes = quill_core::render(self.chapters[self.current].document());
            let lines = render::render_lines(&nodes, &self.theme, width);
            self.cache.put(key.clone(), RenderedChapter { lines });
        }

        self.cache.get(&key).map(|r| r.lines.as_slice()).unwrap_or(&[])
    }

    /// Number of rendered lines at the last drawn width
    pub fn line_count(&mut self) -> usize {
        let width = self.text_width;
        self.rendered_lines(width).len()
    }

    fn max_scroll(&mut self, viewport_height: usize) -> usize {
        self.line_count().saturating_sub(viewport_height)
    }

    pub fn scroll_down(&mut self, lines: usize, viewport_height: usize) {
        let max = self.max_scroll(viewport_height);
        self.scroll = (self.scroll + lines).min(max);
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    pub fn scroll_to_bottom(&mut self, viewport_height: usize) {
        self.scroll = self.max_scroll(viewport_height);
    }

    pub fn toggle_theme(&mut self) {
        self.theme_variant = self.theme_variant.toggled();
        self.theme = Theme::for_variant(self.theme_variant);
    }

    /// Re-read the current chapter from disk
    pub fn reload_chapter(&mut self) -> Result<()> {
        let chapter = &mut self.chapters[self.current];
        chapter.reload()?;
        self.status_message = Some(format!("Reloaded {}", chapter.title()));
        Ok(())
    }

    /// Open the current chapter in the configured editor, then reload it
    pub fn open_in_editor(&mut self) -> Result<()> {
        let command = crate::editor::resolve_editor_command(&self.config.editor.command);
        let path = self.current_chapter().path.clone();

        crate::editor::launch_editor(&command, &self.config.editor.args, &path)?;
        self.reload_chapter()
            .with_context(|| format!("Failed to reload after editing: {}", path.display()))
    }

    pub fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status_message(&mut self) {
        self.status_message = None;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
