//! Temporary audio storage port interface

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::transcription::{AudioData, AudioMimeType};

/// Storage errors
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("Failed to prepare upload directory: {0}")]
    DirectoryUnavailable(String),

    #[error("Failed to write audio file: {0}")]
    WriteFailed(String),

    #[error("Audio file not found after upload: {0}")]
    NotFound(String),

    #[error("Failed to read audio file: {0}")]
    ReadFailed(String),
}

/// Handle to an audio artifact persisted for the lifetime of one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedAudio {
    path: PathBuf,
    mime_type: AudioMimeType,
}

impl StagedAudio {
    pub fn new(path: impl Into<PathBuf>, mime_type: AudioMimeType) -> Self {
        Self {
            path: path.into(),
            mime_type,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mime_type(&self) -> &AudioMimeType {
        &self.mime_type
    }
}

/// Port for request-scoped audio artifacts
#[async_trait]
pub trait AudioStore: Send + Sync {
    /// Persist the audio under a collision-resistant name.
    async fn stage(&self, audio: &AudioData) -> Result<StagedAudio, StorageError>;

    /// Size of the persisted artifact in bytes.
    async fn staged_len(&self, staged: &StagedAudio) -> Result<u64, StorageError>;

    /// Read the persisted artifact back.
    async fn read(&self, staged: &StagedAudio) -> Result<Vec<u8>, StorageError>;

    /// Remove the artifact.
    ///
    /// Best-effort and synchronous so it can run from `Drop`: failures are
    /// logged, never returned.
    fn release(&self, staged: &StagedAudio);
}
