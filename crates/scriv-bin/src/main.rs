//! Scriv entrypoint: inspect and maintain scriv documents from the shell.
//!
//! Without flags it prints a per-buffer summary of the document (elements,
//! words, wrapped lines at the configured width). `--rewrite` saves the
//! document back out, normalizing the file layout.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use core_doc::{Element, rows};
use core_state::State;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "scriv", version, about = "Scriv prose document tool")]
struct Args {
    /// Document to open. If omitted a summary of an empty document is shown.
    pub path: Option<PathBuf>,
    /// Configuration file path (overrides discovery of `scriv.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// Wrap width, overriding the configured value.
    #[arg(long = "width")]
    pub width: Option<usize>,
    /// Save the document back to its file, normalizing the layout.
    #[arg(long = "rewrite")]
    pub rewrite: bool,
}

fn configure_logging() -> Option<WorkerGuard> {
    let file_appender = tracing_appender::rolling::never(".", "scriv.log");
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .try_init()
    {
        Ok(()) => Some(guard),
        Err(_) => None,
    }
}

/// Visual lines an element occupies at the given width.
fn elem_lines(elem: &Element, width: usize) -> usize {
    match elem {
        Element::Paragraph(p) => rows(p.words(), width),
        Element::Header(_) | Element::Rule(_) => 1,
    }
}

fn summarize(state: &State, width: usize) {
    for buf in state.buffers() {
        let lines: usize = buf.elems().iter().map(|e| elem_lines(e, width)).sum();
        let dirty = if buf.is_dirty() { " (unsaved)" } else { "" };
        println!(
            "{}: {} elements, {} words, {} lines at width {}{}",
            buf.name(),
            buf.elem_count(),
            buf.word_count(),
            lines,
            width,
            dirty
        );
    }
    println!(
        "total: {} buffer(s), {} words",
        state.buffers().len(),
        state.word_count()
    );
}

fn main() -> Result<()> {
    let _log_guard = configure_logging();
    let args = Args::parse();

    let config = core_config::load_from(args.config.clone());
    let width = args.width.unwrap_or(config.width);

    let mut state = match &args.path {
        Some(path) => State::load(path)
            .with_context(|| format!("loading document {}", path.display()))?,
        None => State::new(),
    };
    info!(buffers = state.buffers().len(), width, "document opened");

    for buf in state.buffers_mut() {
        buf.reflow(width);
    }
    summarize(&state, width);

    if args.rewrite {
        let path = args
            .path
            .as_ref()
            .context("--rewrite needs a document path")?;
        state
            .save_to(path)
            .with_context(|| format!("saving document {}", path.display()))?;
        println!("rewrote {}", path.display());
    }

    Ok(())
}
