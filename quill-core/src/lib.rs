//! Quill Core - Story markup, editing model, and configuration
//!
//! This crate contains the core logic for quill, independent of terminal UI concerns:
//! - Markup parsing into sections, blocks and inline spans
//! - Rendering of parsed documents into backend-neutral nodes
//! - Selection-splicing editing session
//! - Bulk chapter import and chapter files
//! - Configuration management

pub mod bulk;
pub mod chapter;
pub mod config;
pub mod editing;
pub mod markup;
pub mod render;

// Re-export commonly used types
pub use chapter::{ChapterFile, ChapterNav};
pub use config::Config;
pub use editing::{EditingSession, Format};
pub use markup::{parse, Document};
pub use render::{render, RenderNode};
