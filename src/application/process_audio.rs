//! Process audio use case

use std::time::Duration;

use thiserror::Error;

use crate::domain::error::ValidationError;
use crate::domain::note::{NotePayload, ResponseNormalizer};
use crate::domain::transcription::{AudioData, AudioUpload, TranscriptionPrompt};

use super::janitor::StagedArtifact;
use super::ports::{AudioStore, StorageError, Transcriber, TranscriptionError};
use super::upload_gate::{StagedCheckError, UploadGate};

/// Errors from the process audio use case
#[derive(Debug, Error)]
pub enum ProcessAudioError {
    #[error("Invalid upload: {0}")]
    Validation(#[from] ValidationError),

    #[error("Missing API key. Set GEMINI_API_KEY or configure via 'voice-notes config set api_key <key>'")]
    ServiceConfiguration,

    #[error("Transcription failed: {0}")]
    Transcription(#[from] TranscriptionError),

    #[error("Storage failed: {0}")]
    Storage(#[from] StorageError),
}

impl From<StagedCheckError> for ProcessAudioError {
    fn from(err: StagedCheckError) -> Self {
        match err {
            StagedCheckError::Validation(e) => Self::Validation(e),
            StagedCheckError::Storage(e) => Self::Storage(e),
        }
    }
}

/// Tunables for the pipeline
#[derive(Debug, Clone, Copy)]
pub struct ProcessAudioOptions {
    /// Ingestion cap for a single upload
    pub max_upload_bytes: usize,
    /// Deadline for the transcription call
    pub timeout: Duration,
}

impl Default for ProcessAudioOptions {
    fn default() -> Self {
        Self {
            max_upload_bytes: 25 * 1024 * 1024,
            timeout: Duration::from_secs(60),
        }
    }
}

/// Output from the process audio use case
#[derive(Debug, Clone)]
pub struct ProcessedNote {
    /// The sanitized note
    pub note: NotePayload,
    /// Audio size in human-readable format
    pub audio_size: String,
}

/// Voice note pipeline: validate, stage, transcribe, normalize, sanitize.
///
/// A `None` transcriber means no credential was configured; every upload
/// that passes validation then fails with
/// [`ProcessAudioError::ServiceConfiguration`].
pub struct ProcessAudioUseCase<T, S>
where
    T: Transcriber,
    S: AudioStore,
{
    transcriber: Option<T>,
    store: S,
    gate: UploadGate,
    normalizer: ResponseNormalizer,
    prompt: TranscriptionPrompt,
    timeout: Duration,
}

impl<T, S> ProcessAudioUseCase<T, S>
where
    T: Transcriber,
    S: AudioStore,
{
    /// Create a new use case instance
    pub fn new(transcriber: Option<T>, store: S, options: ProcessAudioOptions) -> Self {
        Self {
            transcriber,
            store,
            gate: UploadGate::new(options.max_upload_bytes),
            normalizer: ResponseNormalizer::new(),
            prompt: TranscriptionPrompt::note(),
            timeout: options.timeout,
        }
    }

    /// Replace the normalizer (fixed dates in tests)
    pub fn with_normalizer(mut self, normalizer: ResponseNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Whether a transcription credential is available
    pub fn is_configured(&self) -> bool {
        self.transcriber.is_some()
    }

    /// Ingestion cap enforced by the upload gate
    pub fn max_upload_bytes(&self) -> usize {
        self.gate.max_bytes()
    }

    /// Execute the pipeline for one upload.
    ///
    /// The staged artifact is released exactly once on every path out of
    /// this function, including cancellation of the returned future.
    pub async fn execute(
        &self,
        upload: Option<AudioUpload>,
    ) -> Result<ProcessedNote, ProcessAudioError> {
        let audio = self.gate.validate(upload)?;
        let audio_size = audio.human_readable_size();

        // Client errors win over a missing credential; nothing is staged without one
        let Some(transcriber) = self.transcriber.as_ref() else {
            tracing::error!("transcription requested but no API key is configured");
            return Err(ProcessAudioError::ServiceConfiguration);
        };

        let artifact = StagedArtifact::acquire(&self.store, &audio).await?;
        self.gate.confirm_staged(&artifact).await?;

        let audio = AudioData::new(artifact.read().await?, audio.mime_type().clone());

        tracing::info!(
            size = %audio_size,
            mime_type = %audio.mime_type(),
            "sending audio for transcription"
        );

        let raw = tokio::time::timeout(self.timeout, transcriber.transcribe(&audio, &self.prompt))
            .await
            .map_err(|_| TranscriptionError::Timeout(self.timeout.as_secs()))??;

        tracing::debug!(raw_len = raw.as_str().len(), "received model response");
        tracing::trace!(raw = %raw, "raw model response");

        let note = self.normalizer.normalize(raw.as_str()).sanitize();
        artifact.release();

        tracing::info!(
            title = %note.title.chars().take(50).collect::<String>(),
            content_len = note.content.len(),
            "processed audio"
        );

        Ok(ProcessedNote { note, audio_size })
    }
}
