//! Canonical layout and event types for the tagger.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Color given to imported buttons that carry none.
pub const DEFAULT_COLOR: &str = "#3f51b5";

/// Longest label a button may carry, in characters.
pub const MAX_LABEL_LEN: usize = 32;

/// A tag button in the active layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonSpec {
    pub label: String,
    pub color: String,
}

impl ButtonSpec {
    pub fn new(label: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            color: color.into(),
        }
    }

    /// Case-insensitive label comparison used for uniqueness and lookup.
    pub fn matches_label(&self, label: &str) -> bool {
        self.label.to_lowercase() == label.to_lowercase()
    }

    /// Layout every new session starts with.
    pub fn seed_layout() -> Vec<ButtonSpec> {
        vec![
            ButtonSpec::new("Pick and Roll", "#3f51b5"),
            ButtonSpec::new("Rebound", "#009688"),
            ButtonSpec::new("Turnover", "#e53935"),
        ]
    }
}

/// One recorded click. The label is copied, so later layout changes never
/// touch history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagEvent {
    pub opponent: String,
    pub game_date: NaiveDate,
    #[serde(with = "timestamp_iso")]
    pub timestamp_iso: NaiveDateTime,
    pub label: String,
}

/// Opponent and date the shell must collect before any tag is accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameContext {
    pub opponent: String,
    pub game_date: Option<NaiveDate>,
}

impl GameContext {
    pub fn new(opponent: impl Into<String>, game_date: Option<NaiveDate>) -> Self {
        Self {
            opponent: opponent.into(),
            game_date,
        }
    }

    pub fn is_ready(&self) -> bool {
        !self.opponent.trim().is_empty() && self.game_date.is_some()
    }
}

/// Second-precision ISO-8601 without offset, e.g. `2024-01-15T19:04:11`.
pub mod timestamp_iso {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn format(ts: &NaiveDateTime) -> String {
        ts.format(FORMAT).to_string()
    }

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}
