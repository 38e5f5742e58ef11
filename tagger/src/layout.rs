//! Layout file codec.
//!
//! A layout file is `{ "buttons": [ { "label": ..., "color": ... }, ... ] }`.
//! Export writes the layout verbatim. Import is lenient per entry (blank
//! labels are dropped, values of any JSON type are coerced to text) but
//! strict about the document shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{TaggerError, TaggerResult};
use crate::types::{ButtonSpec, DEFAULT_COLOR, MAX_LABEL_LEN};

/// Default file name for saved layouts.
pub const LAYOUT_FILE_NAME: &str = "tagger_layout.json";

/// On-disk layout document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutFile {
    pub buttons: Vec<ButtonSpec>,
}

/// An uploaded button entry before cleaning. `None` means the key was
/// missing or `null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawButton {
    pub label: Option<Value>,
    pub color: Option<Value>,
}

impl RawButton {
    pub fn new(label: impl Into<Value>, color: impl Into<Value>) -> Self {
        Self {
            label: Some(label.into()),
            color: Some(color.into()),
        }
    }

    fn from_entry(index: usize, entry: &Value) -> TaggerResult<Self> {
        let obj = entry.as_object().ok_or_else(|| {
            TaggerError::Format(format!("button entry {} is not an object", index))
        })?;
        Ok(Self {
            label: obj.get("label").filter(|v| !v.is_null()).cloned(),
            color: obj.get("color").filter(|v| !v.is_null()).cloned(),
        })
    }

    /// Apply the import cleaning rules. Returns `None` for entries whose
    /// label is blank.
    pub fn clean(&self) -> Option<ButtonSpec> {
        let label: String = coerce(self.label.as_ref())
            .trim()
            .chars()
            .take(MAX_LABEL_LEN)
            .collect();
        if label.is_empty() {
            return None;
        }

        let color = coerce(self.color.as_ref()).trim().to_string();
        let color = if color.is_empty() {
            DEFAULT_COLOR.to_string()
        } else {
            color
        };

        Some(ButtonSpec { label, color })
    }
}

/// Text form of a JSON value: strings as-is, everything else as compact JSON.
fn coerce(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Serialize a layout as a pretty-printed layout document.
pub fn export_json(buttons: &[ButtonSpec]) -> serde_json::Result<String> {
    let file = LayoutFile {
        buttons: buttons.to_vec(),
    };
    serde_json::to_string_pretty(&file)
}

/// Parse an uploaded layout document into raw entries.
pub fn parse_document(text: &str) -> TaggerResult<Vec<RawButton>> {
    let root: Value = serde_json::from_str(text)?;
    let obj = root
        .as_object()
        .ok_or_else(|| TaggerError::Format("layout must be a JSON object".into()))?;
    let buttons = obj
        .get("buttons")
        .ok_or_else(|| TaggerError::Format("missing \"buttons\" list".into()))?
        .as_array()
        .ok_or_else(|| TaggerError::Format("\"buttons\" must be a list".into()))?;

    buttons
        .iter()
        .enumerate()
        .map(|(i, entry)| RawButton::from_entry(i, entry))
        .collect()
}

/// Clean raw entries, dropping blank labels. Order and duplicates are kept.
pub fn sanitize(raw: &[RawButton]) -> Vec<ButtonSpec> {
    raw.iter().filter_map(RawButton::clean).collect()
}
