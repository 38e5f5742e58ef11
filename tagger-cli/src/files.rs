//! Layout and CSV file plumbing for the shell.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use tagger::{layout, write_csv, ButtonSpec, Session};

use crate::ShellError;

fn io_error(path: &Path, source: std::io::Error) -> ShellError {
    ShellError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn ensure_parent(path: &Path) -> Result<(), ShellError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
    }
    Ok(())
}

/// Write the current layout to `path`.
pub fn save_layout(session: &Session, path: &Path) -> Result<PathBuf, ShellError> {
    ensure_parent(path)?;
    let json = session.export_layout_json()?;
    std::fs::write(path, json).map_err(|e| io_error(path, e))?;
    tracing::info!("Saved layout to {}", path.display());
    Ok(path.to_path_buf())
}

/// Replace the session layout with the one stored at `path`.
///
/// The layout is left untouched when the file cannot be read or holds no
/// valid buttons.
pub fn load_layout(session: &mut Session, path: &Path) -> Result<usize, ShellError> {
    let contents = std::fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    let loaded = session.import_layout_json(&contents)?;
    tracing::info!("Loaded {} buttons from {}", loaded, path.display());
    Ok(loaded)
}

/// Read a layout file and return the buttons it would load, without
/// touching any session.
pub fn check_layout(path: &Path) -> Result<Vec<ButtonSpec>, ShellError> {
    let contents = std::fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    let raw = layout::parse_document(&contents)?;
    let mut scratch = Session::with_layout(Vec::new());
    scratch.replace_layout(&raw)?;
    Ok(scratch.layout().to_vec())
}

/// Write the event log to `path` as CSV, in insertion order.
pub fn export_events(session: &Session, path: &Path) -> Result<PathBuf, ShellError> {
    ensure_parent(path)?;
    let file = File::create(path).map_err(|e| io_error(path, e))?;
    write_csv(session.events(), BufWriter::new(file))?;
    tracing::info!("Exported {} events to {}", session.len(), path.display());
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_save_then_load_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("layout.json");

        let mut source = Session::new();
        source.add_button("Fast Break", "#ff9800").unwrap();
        save_layout(&source, &path).unwrap();

        let mut target = Session::with_layout(vec![ButtonSpec::new("Other", "#000")]);
        assert_eq!(load_layout(&mut target, &path).unwrap(), 4);
        assert_eq!(target.layout(), source.layout());
    }

    #[test]
    fn test_load_missing_file_keeps_layout() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new();
        let err = load_layout(&mut session, &dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ShellError::Io { .. }));
        assert_eq!(session.layout().len(), 3);
    }

    #[test]
    fn test_check_layout_reports_cleaned_buttons() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");
        std::fs::write(
            &path,
            r#"{"buttons": [{"label": " Steal "}, {"label": ""}]}"#,
        )
        .unwrap();

        let buttons = check_layout(&path).unwrap();
        assert_eq!(buttons, vec![ButtonSpec::new("Steal", tagger::DEFAULT_COLOR)]);
    }

    #[test]
    fn test_export_events_writes_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.csv");
        let mut session = Session::new();
        let date = NaiveDate::from_ymd_opt(2024, 1, 15);
        session
            .record_tag(
                "Acadia",
                date,
                "Rebound",
                date.unwrap().and_hms_opt(19, 0, 0).unwrap(),
            )
            .unwrap();

        export_events(&session, &path).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(
            lines,
            vec![
                "opponent,game_date,timestamp_iso,label",
                "Acadia,2024-01-15,2024-01-15T19:00:00,Rebound"
            ]
        );
    }
}
