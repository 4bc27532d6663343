//! Upload validation

use crate::domain::error::ValidationError;
use crate::domain::transcription::{AudioData, AudioMimeType, AudioUpload};

use super::janitor::StagedArtifact;
use super::ports::{AudioStore, StorageError};

/// Declared type assumed when the client sent none
const UNKNOWN_MEDIA_TYPE: &str = "application/octet-stream";

/// Error from confirming a staged upload
#[derive(Debug, thiserror::Error)]
pub enum StagedCheckError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Rejects unusable uploads before any external call is paid for
#[derive(Debug, Clone, Copy)]
pub struct UploadGate {
    max_bytes: usize,
}

impl UploadGate {
    pub fn new(max_bytes: usize) -> Self {
        Self { max_bytes }
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Check presence, declared media type, and size
    pub fn validate(&self, upload: Option<AudioUpload>) -> Result<AudioData, ValidationError> {
        let upload = upload.ok_or(ValidationError::MissingFile)?;

        let declared = upload.declared_type.as_deref().unwrap_or(UNKNOWN_MEDIA_TYPE);
        let mime_type = AudioMimeType::from_declared(declared)?;

        let size = upload.size_bytes();
        if size > self.max_bytes {
            return Err(ValidationError::FileTooLarge {
                size,
                limit: self.max_bytes,
            });
        }

        Ok(AudioData::new(upload.data, mime_type))
    }

    /// Reject an artifact that ended up empty on disk
    pub async fn confirm_staged<S: AudioStore + ?Sized>(
        &self,
        artifact: &StagedArtifact<'_, S>,
    ) -> Result<(), StagedCheckError> {
        if artifact.size_on_disk().await? == 0 {
            return Err(ValidationError::EmptyFile.into());
        }
        Ok(())
    }
}
