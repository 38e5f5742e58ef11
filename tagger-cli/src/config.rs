//! Configuration for the tagger shell.
//!
//! Every value has a compile-time default and can be overridden at runtime
//! via a dedicated environment variable.

use std::path::PathBuf;

use tagger::{EVENTS_FILE_NAME, LAYOUT_FILE_NAME};

/// Default directory for the rolling log file.
const DEFAULT_LOG_DIR: &str = "logs";

/// Default directory that relative save/export paths resolve against.
const DEFAULT_OUTPUT_DIR: &str = ".";

/// Get the directory the rolling log file is written to.
///
/// Priority:
/// 1. `TAGGER_LOG_DIR` env variable if set
/// 2. `./logs` as fallback
pub fn get_log_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("TAGGER_LOG_DIR") {
        return PathBuf::from(dir);
    }

    PathBuf::from(DEFAULT_LOG_DIR)
}

/// Get the directory layouts and CSV exports are saved to.
///
/// Priority:
/// 1. `TAGGER_OUTPUT_DIR` env variable if set
/// 2. the current directory as fallback
pub fn get_output_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("TAGGER_OUTPUT_DIR") {
        return PathBuf::from(dir);
    }

    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

/// Where `save-layout` writes when no path is given.
pub fn default_layout_path(output_dir: &std::path::Path) -> PathBuf {
    output_dir.join(LAYOUT_FILE_NAME)
}

/// Where `export-csv` writes when no path is given.
pub fn default_events_path(output_dir: &std::path::Path) -> PathBuf {
    output_dir.join(EVENTS_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_log_dir() {
        let dir = get_log_dir();
        match std::env::var("TAGGER_LOG_DIR") {
            Ok(val) => assert_eq!(dir, PathBuf::from(val)),
            Err(_) => assert_eq!(dir, PathBuf::from(DEFAULT_LOG_DIR)),
        }
    }

    #[test]
    fn test_get_output_dir() {
        let dir = get_output_dir();
        match std::env::var("TAGGER_OUTPUT_DIR") {
            Ok(val) => assert_eq!(dir, PathBuf::from(val)),
            Err(_) => assert_eq!(dir, PathBuf::from(DEFAULT_OUTPUT_DIR)),
        }
    }

    #[test]
    fn test_default_file_names() {
        let dir = PathBuf::from("/tmp/game");
        assert!(default_layout_path(&dir).ends_with("tagger_layout.json"));
        assert!(default_events_path(&dir).ends_with("tag_events.csv"));
    }
}
