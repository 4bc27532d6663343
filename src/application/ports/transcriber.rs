//! Transcription port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::transcription::{AudioData, RawModelResponse, TranscriptionPrompt};

/// Transcription errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranscriptionError {
    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Quota exceeded. Please try again later.")]
    QuotaExceeded,

    #[error("Transcription timed out after {0} seconds")]
    Timeout(u64),

    #[error("No candidates in API response")]
    EmptyResponse,

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    #[error("API error: {0}")]
    ApiError(String),
}

impl TranscriptionError {
    /// Whether the failure is transient and the user should simply retry later
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::QuotaExceeded | Self::Timeout(_))
    }
}

/// Port for audio transcription
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe audio data into raw model text.
    ///
    /// Makes exactly one attempt; retries are the caller's business.
    ///
    /// # Arguments
    /// * `audio` - The audio data to transcribe
    /// * `prompt` - The instruction sent with the audio
    ///
    /// # Returns
    /// The unparsed model output or an error
    async fn transcribe(
        &self,
        audio: &AudioData,
        prompt: &TranscriptionPrompt,
    ) -> Result<RawModelResponse, TranscriptionError>;
}
