//! Error types for the tagging session store

use thiserror::Error;

pub type TaggerResult<T> = Result<T, TaggerError>;

/// Every rejected operation leaves the session exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaggerError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to load: {0}")]
    Format(String),
}

/// The input rule that was broken. `Display` is the message shown to the user.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Label is required.")]
    EmptyLabel,

    #[error("Label must be at most {} characters.", crate::MAX_LABEL_LEN)]
    LabelTooLong,

    #[error("That label already exists.")]
    DuplicateLabel,

    #[error("Enter Opponent and Date first.")]
    MissingContext,

    #[error("No valid buttons found in uploaded layout.")]
    NoValidButtons,
}

impl From<serde_json::Error> for TaggerError {
    fn from(e: serde_json::Error) -> Self {
        Self::Format(e.to_string())
    }
}

impl TaggerError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages_are_user_facing() {
        let err = TaggerError::from(ValidationError::DuplicateLabel);
        assert_eq!(err.to_string(), "That label already exists.");
        assert!(err.is_validation());

        let err = TaggerError::from(ValidationError::LabelTooLong);
        assert_eq!(err.to_string(), "Label must be at most 32 characters.");
    }

    #[test]
    fn test_format_error_carries_cause() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = TaggerError::from(json_err);
        let msg = err.to_string();
        assert!(msg.starts_with("Failed to load: "));
        assert!(msg.contains("EOF while parsing"), "{}", msg);
        assert!(!err.is_validation());
    }
}
