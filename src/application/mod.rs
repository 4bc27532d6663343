//! Application layer - Use cases and port interfaces
//!
//! Contains the voice note pipeline and trait definitions
//! for external system interactions.

pub mod janitor;
pub mod ports;
pub mod process_audio;
pub mod upload_gate;

// Re-export use cases
pub use janitor::StagedArtifact;
pub use process_audio::{
    ProcessAudioError, ProcessAudioOptions, ProcessAudioUseCase, ProcessedNote,
};
pub use upload_gate::UploadGate;
