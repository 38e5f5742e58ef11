//! CSV export of the event log.

use std::io;

use crate::session::Session;
use crate::types::TagEvent;

/// Default file name for exported events.
pub const EVENTS_FILE_NAME: &str = "tag_events.csv";

/// Errors from writing an export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Write a header row and one row per event, in the order given.
///
/// Columns are `opponent,game_date,timestamp_iso,label`.
pub fn write_csv<'a, W, I>(events: I, writer: W) -> Result<(), ExportError>
where
    W: io::Write,
    I: IntoIterator<Item = &'a TagEvent>,
{
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(["opponent", "game_date", "timestamp_iso", "label"])?;
    for event in events {
        wtr.serialize(event)?;
    }
    wtr.flush()?;
    Ok(())
}

/// The session's events as CSV, in insertion order.
pub fn events_csv(session: &Session) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_csv(session.events(), &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
