//! Line-oriented tagging shell.
//!
//! Reads one command per line, dispatches it to the [`Session`], and
//! re-renders the affected views after every mutation.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{Local, NaiveDate, NaiveDateTime};
use tagger::{GameContext, Session, UndoOutcome, DEFAULT_COLOR};

use crate::{config, files, ShellError};

/// Buttons shown per row of the grid.
const BUTTONS_PER_ROW: usize = 5;

const HELP: &str = "\
Commands:
  opponent <name>           set the opponent
  date <YYYY-MM-DD>         set the game date
  info                      show the game context
  add <label> [| <color>]   add a tag button
  buttons                   show the button grid
  tag <label|number>        record a tag (a bare number also tags)
  undo                      remove the last tag
  reset                     clear all tags
  totals                    show tag totals
  events                    show recent events
  save-layout [path]        save the button layout as JSON
  load-layout <path>        load a button layout from JSON
  export-csv [path]         export events as CSV
  help                      show this help
  quit                      leave the shell";

/// A parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Opponent(String),
    Date(NaiveDate),
    Info,
    Add { label: String, color: Option<String> },
    Buttons,
    Tag(String),
    Undo,
    Reset,
    Totals,
    Events,
    SaveLayout(Option<PathBuf>),
    LoadLayout(PathBuf),
    ExportCsv(Option<PathBuf>),
    Help,
    Quit,
    Empty,
}

impl FromStr for Command {
    type Err = ShellError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (keyword, rest) = match line.split_once(char::is_whitespace) {
            Some((keyword, rest)) => (keyword, rest.trim()),
            None => (line, ""),
        };
        let optional_path = |rest: &str| (!rest.is_empty()).then(|| PathBuf::from(rest));

        let command = match keyword.to_ascii_lowercase().as_str() {
            "" => Command::Empty,
            "opponent" => Command::Opponent(rest.to_string()),
            "date" => Command::Date(parse_date(rest)?),
            "info" => Command::Info,
            "add" => {
                let (label, color) = match rest.split_once('|') {
                    Some((label, color)) => (label.trim(), Some(color.trim())),
                    None => (rest, None),
                };
                Command::Add {
                    label: label.to_string(),
                    color: color.filter(|c| !c.is_empty()).map(str::to_string),
                }
            }
            "buttons" => Command::Buttons,
            "tag" if rest.is_empty() => {
                return Err(ShellError::Usage("Usage: tag <label|number>".into()))
            }
            "tag" => Command::Tag(rest.to_string()),
            "undo" => Command::Undo,
            "reset" => Command::Reset,
            "totals" => Command::Totals,
            "events" => Command::Events,
            "save-layout" => Command::SaveLayout(optional_path(rest)),
            "load-layout" if rest.is_empty() => {
                return Err(ShellError::Usage("Usage: load-layout <path>".into()))
            }
            "load-layout" => Command::LoadLayout(PathBuf::from(rest)),
            "export-csv" => Command::ExportCsv(optional_path(rest)),
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ if keyword.parse::<usize>().is_ok() && rest.is_empty() => {
                Command::Tag(keyword.to_string())
            }
            other => {
                return Err(ShellError::Usage(format!(
                    "Unknown command '{}'. Type 'help' for a list of commands.",
                    other
                )))
            }
        };
        Ok(command)
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, ShellError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| ShellError::Usage(format!("Invalid date '{}': expected YYYY-MM-DD", s)))
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Shell state: the session, the game context, and where output goes.
pub struct Shell<W: Write> {
    session: Session,
    context: GameContext,
    output_dir: PathBuf,
    out: W,
    clock: fn() -> NaiveDateTime,
}

impl<W: Write> Shell<W> {
    pub fn new(session: Session, context: GameContext, output_dir: PathBuf, out: W) -> Self {
        Self {
            session,
            context,
            output_dir,
            out,
            clock: local_now,
        }
    }

    /// Replace the wall clock used to timestamp tags
    #[cfg(test)]
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    #[cfg(test)]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }

    /// Load a layout before the shell starts. A failure is reported like a
    /// failed `load-layout` and the current layout is kept.
    pub fn preload_layout(&mut self, path: &Path) -> io::Result<()> {
        match files::load_layout(&mut self.session, path) {
            Ok(loaded) => writeln!(self.out, "Loaded {} buttons.", loaded),
            Err(e) => {
                tracing::warn!("Layout preload from {} failed: {}", path.display(), e);
                writeln!(self.out, "{}", e)
            }
        }
    }

    /// Run until `quit` or end of input.
    pub fn run<R: BufRead>(&mut self, input: R) -> io::Result<()> {
        writeln!(self.out, "Game Tagger: type 'help' for commands.")?;
        self.render_context()?;
        self.render_buttons()?;

        let mut lines = input.lines();
        loop {
            write!(self.out, "> ")?;
            self.out.flush()?;

            let Some(line) = lines.next().transpose()? else {
                writeln!(self.out)?;
                break;
            };

            match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => {
                    if let Err(e) = self.execute(command) {
                        tracing::debug!("Command failed: {}", e);
                        writeln!(self.out, "{}", e)?;
                    }
                }
                Err(e) => writeln!(self.out, "{}", e)?,
            }
        }

        tracing::info!(events = self.session.len(), "Shell exited");
        Ok(())
    }

    /// Apply one command, then render whatever it changed.
    pub fn execute(&mut self, command: Command) -> Result<(), ShellError> {
        match command {
            Command::Empty | Command::Quit => {}
            Command::Help => writeln!(self.out, "{}", HELP)?,
            Command::Opponent(name) => {
                self.context.opponent = name;
                self.render_context()?;
            }
            Command::Date(date) => {
                self.context.game_date = Some(date);
                self.render_context()?;
            }
            Command::Info => self.render_context()?,
            Command::Add { label, color } => {
                let color = color.as_deref().unwrap_or(DEFAULT_COLOR);
                let added = self.session.add_button(&label, color)?.label.clone();
                writeln!(self.out, "Added: {}", added)?;
                self.render_buttons()?;
            }
            Command::Buttons => self.render_buttons()?,
            Command::Tag(target) => {
                let label = self.resolve_button(&target)?;
                let now = (self.clock)();
                self.session.record_tag(
                    &self.context.opponent,
                    self.context.game_date,
                    &label,
                    now,
                )?;
                writeln!(self.out, "Tagged: {}", label)?;
                self.render_totals()?;
            }
            Command::Undo => {
                match self.session.undo_last() {
                    UndoOutcome::Removed(_) => writeln!(self.out, "Undid last tag.")?,
                    UndoOutcome::NothingToUndo => writeln!(self.out, "No events to undo.")?,
                }
                self.render_totals()?;
            }
            Command::Reset => {
                self.session.reset_events();
                writeln!(self.out, "Cleared all events.")?;
                self.render_totals()?;
            }
            Command::Totals => self.render_totals()?,
            Command::Events => self.render_events()?,
            Command::SaveLayout(path) => {
                let path = self.resolve_path(path, config::default_layout_path);
                let saved = files::save_layout(&self.session, &path)?;
                writeln!(self.out, "Saved layout to {}", saved.display())?;
            }
            Command::LoadLayout(path) => {
                let path = self.output_path(path);
                let loaded = files::load_layout(&mut self.session, &path)?;
                writeln!(self.out, "Loaded {} buttons.", loaded)?;
                self.render_buttons()?;
            }
            Command::ExportCsv(path) => {
                let path = self.resolve_path(path, config::default_events_path);
                let saved = files::export_events(&self.session, &path)?;
                writeln!(
                    self.out,
                    "Exported {} events to {}",
                    self.session.len(),
                    saved.display()
                )?;
            }
        }
        Ok(())
    }

    /// Map a label (ignoring case) or a grid number to the layout's label.
    /// A label match wins, so numeric labels stay reachable.
    fn resolve_button(&self, target: &str) -> Result<String, ShellError> {
        if let Some(button) = self.session.find_button(target) {
            return Ok(button.label.clone());
        }
        target
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| self.session.layout().get(i))
            .map(|b| b.label.clone())
            .ok_or_else(|| ShellError::UnknownButton(target.trim().to_string()))
    }

    /// Relative paths resolve against the output directory.
    fn output_path(&self, path: PathBuf) -> PathBuf {
        if path.is_absolute() {
            path
        } else {
            self.output_dir.join(path)
        }
    }

    fn resolve_path(&self, path: Option<PathBuf>, default: fn(&Path) -> PathBuf) -> PathBuf {
        match path {
            Some(p) => self.output_path(p),
            None => default(&self.output_dir),
        }
    }

    fn render_context(&mut self) -> io::Result<()> {
        let opponent = match self.context.opponent.trim() {
            "" => "-",
            name => name,
        };
        let date = self
            .context
            .game_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        writeln!(self.out, "Opponent: {}  Game Date: {}", opponent, date)?;
        if !self.context.is_ready() {
            writeln!(
                self.out,
                "Opponent & Date are required before you can tag."
            )?;
        }
        Ok(())
    }

    fn render_buttons(&mut self) -> io::Result<()> {
        let buttons = self.session.layout();
        if buttons.is_empty() {
            return writeln!(
                self.out,
                "No buttons yet. Add tags with: add <label> [| <color>]"
            );
        }

        let cells: Vec<String> = buttons
            .iter()
            .enumerate()
            .map(|(i, b)| format!("[{}] {} ({})", i + 1, b.label, b.color))
            .collect();
        for row in cells.chunks(BUTTONS_PER_ROW) {
            writeln!(self.out, "{}", row.join("  "))?;
        }
        Ok(())
    }

    fn render_totals(&mut self) -> io::Result<()> {
        let counts = self.session.compute_counts();
        writeln!(self.out, "Totals")?;
        if counts.is_empty() {
            return writeln!(self.out, "No tags yet.");
        }

        let width = counts
            .keys()
            .map(|k| k.chars().count())
            .max()
            .unwrap_or(0)
            .max("Tag".len());
        writeln!(self.out, "{:<width$}  Total", "Tag", width = width)?;
        for (label, total) in &counts {
            writeln!(self.out, "{:<width$}  {}", label, total, width = width)?;
        }
        Ok(())
    }

    fn render_events(&mut self) -> io::Result<()> {
        writeln!(self.out, "Recent Events")?;
        let events = self.session.sorted_events();
        if events.is_empty() {
            return writeln!(self.out, "No events yet.");
        }

        let width = events
            .iter()
            .map(|e| e.opponent.chars().count())
            .max()
            .unwrap_or(0)
            .max("opponent".len());
        writeln!(
            self.out,
            "{:<width$}  {:<10}  {:<19}  label",
            "opponent",
            "game_date",
            "timestamp_iso",
            width = width
        )?;
        for event in events {
            writeln!(
                self.out,
                "{:<width$}  {:<10}  {:<19}  {}",
                event.opponent,
                event.game_date.to_string(),
                tagger::types::timestamp_iso::format(&event.timestamp_iso),
                event.label,
                width = width
            )?;
        }
        Ok(())
    }
}
