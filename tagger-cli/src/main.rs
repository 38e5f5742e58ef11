//! Tagger CLI - terminal shell for tagging game events.
//!
//! With no subcommand this starts an interactive shell on stdin/stdout that
//! records tags against one game. Layout and CSV files are written to the
//! output directory (see [`config`]). Logs go to a daily rolling file so the
//! terminal stays free for the shell.

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tagger::{ButtonSpec, ExportError, GameContext, Session, TaggerError};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod files;
mod shell;

/// Top-level CLI arguments.
#[derive(Parser)]
#[command(name = "tagger", about = "Tag game events from the terminal")]
struct Cli {
    /// Opponent to preset for this game.
    #[arg(long)]
    opponent: Option<String>,

    /// Game date to preset, as YYYY-MM-DD.
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Layout file to load before the shell starts.
    #[arg(long)]
    layout: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect layout files.
    Layout {
        #[command(subcommand)]
        action: LayoutAction,
    },
}

#[derive(Subcommand)]
enum LayoutAction {
    /// Print the layout a new session starts with.
    Default,
    /// Show the buttons a layout file would load.
    Check {
        /// Path to the layout JSON file.
        path: PathBuf,
    },
}

/// Errors surfaced to the user by the shell. None of them end the session.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("{0}")]
    Tagger(#[from] TaggerError),

    #[error("Failed to export events: {0}")]
    Export(#[from] ExportError),

    #[error("Failed to serialize layout: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Output error: {0}")]
    Output(#[from] io::Error),

    #[error("No button named '{0}'.")]
    UnknownButton(String),

    #[error("{0}")]
    Usage(String),
}

fn init_tracing() -> anyhow::Result<tracing_appender::non_blocking::WorkerGuard> {
    let log_dir = config::get_log_dir();
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;
    let file_appender = tracing_appender::rolling::daily(&log_dir, "tagger");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    Ok(guard)
}

fn print_buttons(buttons: &[ButtonSpec]) {
    for (i, b) in buttons.iter().enumerate() {
        println!("{:>2}. {} ({})", i + 1, b.label, b.color);
    }
}

fn handle_layout(action: LayoutAction) -> anyhow::Result<()> {
    match action {
        LayoutAction::Default => {
            let json = Session::new().export_layout_json()?;
            println!("{}", json);
        }
        LayoutAction::Check { path } => {
            let buttons = files::check_layout(&path)?;
            println!("{} loads {} buttons:", path.display(), buttons.len());
            print_buttons(&buttons);
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = init_tracing()?;

    if let Some(Commands::Layout { action }) = cli.command {
        return handle_layout(action);
    }

    tracing::info!("Tagger starting up");

    let context = GameContext::new(cli.opponent.unwrap_or_default(), cli.date);
    let output_dir = config::get_output_dir();
    tracing::debug!("Output directory: {}", output_dir.display());

    let stdout = io::stdout();
    let mut shell = shell::Shell::new(Session::new(), context, output_dir, stdout.lock());
    if let Some(path) = &cli.layout {
        shell.preload_layout(path)?;
    }
    shell.run(io::stdin().lock())?;

    tracing::info!("Tagger shutting down");
    Ok(())
}
