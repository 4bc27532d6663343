//! Note payload value object

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Maximum title length, in characters, of a payload leaving the service
pub const TITLE_MAX_CHARS: usize = 100;

/// Content used when the model produced text that is too short to be a transcription
pub const TRANSCRIPTION_UNCLEAR_MESSAGE: &str = "The audio was processed but the content could not be clearly transcribed. Please try recording again with clearer audio.";

/// Content used when nothing usable survived parsing
pub const NO_CONTENT_MESSAGE: &str =
    "The audio was processed but no meaningful content could be extracted. Please try recording again.";

/// Dated title used when no title can be derived
pub fn placeholder_title(date: NaiveDate) -> String {
    format!("Voice Note {}", date.format("%Y-%m-%d"))
}

/// A `{title, content}` note ready to hand to the note store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotePayload {
    pub title: String,
    pub content: String,
}

impl NotePayload {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Last gate before the payload leaves the service.
    ///
    /// Trims both fields and truncates the title to [`TITLE_MAX_CHARS`]
    /// characters. Applying it twice yields the same payload.
    pub fn sanitize(self) -> Self {
        let title: String = self.title.trim().chars().take(TITLE_MAX_CHARS).collect();
        Self {
            title: title.trim().to_string(),
            content: self.content.trim().to_string(),
        }
    }
}
