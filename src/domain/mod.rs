//! Domain layer - Core business logic
//!
//! Contains value objects, the response normalizer, and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod error;
pub mod note;
pub mod transcription;

// Re-export common types
pub use config::AppConfig;
pub use error::*;
pub use note::{NotePayload, ResponseNormalizer};
pub use transcription::{AudioData, AudioMimeType, AudioUpload, RawModelResponse, TranscriptionPrompt};
