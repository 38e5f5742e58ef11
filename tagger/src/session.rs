use chrono::{NaiveDate, NaiveDateTime, SubsecRound};

use crate::error::{TaggerError, TaggerResult, ValidationError};
use crate::layout::{self, RawButton};
use crate::types::{ButtonSpec, TagEvent, MAX_LABEL_LEN};

/// State for one tagging session: the button layout and the event log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    layout: Vec<ButtonSpec>,
    events: Vec<TagEvent>,
}

/// Result of an undo request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoOutcome {
    Removed(TagEvent),
    NothingToUndo,
}

impl Session {
    /// Create a session with the seed layout and an empty log
    pub fn new() -> Self {
        Self::with_layout(ButtonSpec::seed_layout())
    }

    pub fn with_layout(layout: Vec<ButtonSpec>) -> Self {
        Self {
            layout,
            events: Vec::new(),
        }
    }

    pub fn layout(&self) -> &[ButtonSpec] {
        &self.layout
    }

    /// Events in insertion order
    pub fn events(&self) -> &[TagEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Look up a button by label, ignoring case
    pub fn find_button(&self, label: &str) -> Option<&ButtonSpec> {
        let label = label.trim();
        self.layout.iter().find(|b| b.matches_label(label))
    }

    /// Append a new button to the layout.
    pub fn add_button(&mut self, label: &str, color: &str) -> TaggerResult<&ButtonSpec> {
        let label = label.trim();
        if label.is_empty() {
            return Err(reject(ValidationError::EmptyLabel));
        }
        if label.chars().count() > MAX_LABEL_LEN {
            return Err(reject(ValidationError::LabelTooLong));
        }
        if self.find_button(label).is_some() {
            return Err(reject(ValidationError::DuplicateLabel));
        }

        self.layout.push(ButtonSpec::new(label, color));
        tracing::debug!(label, color, "Added button");
        Ok(&self.layout[self.layout.len() - 1])
    }

    /// Replace the whole layout with cleaned entries. Returns the number of
    /// buttons loaded.
    ///
    /// Blank labels are dropped silently. Duplicate labels in the source are
    /// kept as-is.
    pub fn replace_layout(&mut self, raw: &[RawButton]) -> TaggerResult<usize> {
        let cleaned = layout::sanitize(raw);
        if cleaned.is_empty() {
            return Err(reject(ValidationError::NoValidButtons));
        }

        let count = cleaned.len();
        self.layout = cleaned;
        tracing::debug!(count, "Replaced layout");
        Ok(count)
    }

    /// Parse a layout document and replace the layout with it
    pub fn import_layout_json(&mut self, text: &str) -> TaggerResult<usize> {
        let raw = layout::parse_document(text).inspect_err(|e| {
            tracing::warn!("Rejected layout document: {}", e);
        })?;
        self.replace_layout(&raw)
    }

    pub fn export_layout_json(&self) -> serde_json::Result<String> {
        layout::export_json(&self.layout)
    }

    /// Record a tag against the given game.
    ///
    /// Nothing is recorded unless the opponent is non-blank and a date is
    /// given; the caller should prompt for context and let the user click
    /// again.
    pub fn record_tag(
        &mut self,
        opponent: &str,
        game_date: Option<NaiveDate>,
        label: &str,
        now: NaiveDateTime,
    ) -> TaggerResult<&TagEvent> {
        let opponent = opponent.trim();
        let game_date = match game_date {
            Some(date) if !opponent.is_empty() => date,
            _ => return Err(reject(ValidationError::MissingContext)),
        };

        self.events.push(TagEvent {
            opponent: opponent.to_string(),
            game_date,
            timestamp_iso: now.trunc_subsecs(0),
            label: label.to_string(),
        });
        tracing::debug!(label, opponent, total = self.events.len(), "Recorded tag");
        Ok(&self.events[self.events.len() - 1])
    }

    /// Remove the most recently recorded event
    pub fn undo_last(&mut self) -> UndoOutcome {
        match self.events.pop() {
            Some(event) => {
                tracing::debug!(label = %event.label, "Undid tag");
                UndoOutcome::Removed(event)
            }
            None => UndoOutcome::NothingToUndo,
        }
    }

    /// Clear the event log. The layout is kept.
    pub fn reset_events(&mut self) {
        let cleared = self.events.len();
        self.events.clear();
        tracing::debug!(cleared, "Reset events");
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

fn reject(err: ValidationError) -> TaggerError {
    tracing::warn!("Rejected: {}", err);
    TaggerError::Validation(err)
}
