//! Quill - read, format and split story chapters written in story markup

mod commands;

use anyhow::{bail, Context, Result};
use commands::Action;
use clap::{Parser, Subcommand};
use quill_core::bulk::ImportOutcome;
use quill_core::{ChapterFile, Config};
use quill_tui::App;
use std::io;
use std::path::{Path, PathBuf};

/// Read and author story chapters
#[derive(Parser, Debug)]
#[command(name = "quill")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Read chapters in the terminal, in the order given
    Read {
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },
    /// Print a rendered chapter to stdout
    Render {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Do not emit terminal styling
        #[arg(long)]
        plain: bool,
    },
    /// Apply a toolbar action to a selection of a chapter
    Apply {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[arg(long, value_enum)]
        format: Action,
        /// Selection start, in characters
        #[arg(long)]
        start: usize,
        /// Selection end, in characters (defaults to start)
        #[arg(long)]
        end: Option<usize>,
        /// Write the result back instead of printing it
        #[arg(long)]
        in_place: bool,
    },
    /// Split one pasted file into chapters
    Split {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[arg(long)]
        separator: Option<String>,
        #[arg(long)]
        start_number: Option<u32>,
        /// Write each chapter to NNN.txt in this directory, title first
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = Config::load().context("Failed to load configuration")?;

    match args.command {
        Command::Read { files } => read(config, &files),
        Command::Render { file, plain } => render(&file, plain),
        Command::Apply {
            file,
            format,
            start,
            end,
            in_place,
        } => apply(&file, format, start, end.unwrap_or(start), in_place),
        Command::Split {
            file,
            separator,
            start_number,
            out_dir,
        } => {
            let separator = separator.unwrap_or_else(|| config.bulk.separator.clone());
            let start_number = start_number.unwrap_or(config.bulk.start_number);
            split(&file, &separator, start_number, out_dir.as_deref())
        }
    }
}

fn read(config: Config, files: &[PathBuf]) -> Result<()> {
    let chapters = files
        .iter()
        .map(|path| {
            ChapterFile::load(path)
                .with_context(|| format!("Failed to load chapter: {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    let app = App::new(config, chapters)?;
    quill_tui::run(app).context("TUI application error")
}

fn render(file: &Path, plain: bool) -> Result<()> {
    let chapter = ChapterFile::load(file)?;
    if chapter.document().is_blank() {
        log::warn!("{} has no text to render", file.display());
    }
    let nodes = quill_core::render(chapter.document());
    quill_tui::print::print_nodes(&nodes, plain, &mut io::stdout().lock())
}

fn apply(file: &Path, action: Action, start: usize, end: usize, in_place: bool) -> Result<()> {
    let mut chapter = ChapterFile::load(file)?;
    let text = commands::apply_action(&chapter.text(), action, start, end)?;

    if in_place {
        chapter.save_text(&text)?;
    } else {
        print!("{}", text);
    }
    Ok(())
}

fn split(file: &Path, separator: &str, start_number: u32, out_dir: Option<&Path>) -> Result<()> {
    let report = commands::split_file(file, separator, start_number, out_dir, &mut io::stdout().lock())?;

    if let Some(report) = report {
        if report.outcome() == ImportOutcome::AllFailed {
            bail!("{}", report.message());
        }
    }
    Ok(())
}
