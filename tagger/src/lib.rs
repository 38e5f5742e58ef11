pub mod error;
pub mod export;
pub mod layout;
pub mod session;
pub mod types;
pub mod views;

pub use error::{TaggerError, TaggerResult, ValidationError};
pub use export::{events_csv, write_csv, ExportError, EVENTS_FILE_NAME};
pub use layout::{LayoutFile, RawButton, LAYOUT_FILE_NAME};
pub use session::{Session, UndoOutcome};
pub use types::{ButtonSpec, GameContext, TagEvent, DEFAULT_COLOR, MAX_LABEL_LEN};
