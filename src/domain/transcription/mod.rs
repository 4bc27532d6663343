//! Transcription domain module

mod audio_data;
mod prompt;
mod raw_response;
mod upload;

pub use audio_data::{AudioData, AudioMimeType};
pub use prompt::TranscriptionPrompt;
pub use raw_response::RawModelResponse;
pub use upload::AudioUpload;
