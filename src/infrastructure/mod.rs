//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with external systems like the Gemini API and the filesystem.

pub mod config;
pub mod logging;
pub mod storage;
pub mod transcription;

// Re-export adapters
pub use config::XdgConfigStore;
pub use storage::TempDirAudioStore;
pub use transcription::GeminiTranscriber;
