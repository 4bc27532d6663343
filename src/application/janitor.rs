//! Scoped ownership of a staged audio artifact

use crate::domain::transcription::AudioData;

use super::ports::{AudioStore, StagedAudio, StorageError};

/// Guard that owns a staged artifact for the duration of one request.
///
/// The artifact is released exactly once: explicitly through
/// [`StagedArtifact::release`], or on drop when the pipeline returns early,
/// propagates an error, or is cancelled because the client went away.
pub struct StagedArtifact<'a, S: AudioStore + ?Sized> {
    store: &'a S,
    staged: StagedAudio,
    released: bool,
}

impl<'a, S: AudioStore + ?Sized> StagedArtifact<'a, S> {
    /// Persist the audio and take ownership of the resulting artifact
    pub async fn acquire(store: &'a S, audio: &AudioData) -> Result<Self, StorageError> {
        let staged = store.stage(audio).await?;
        tracing::debug!(path = %staged.path().display(), "staged audio artifact");
        Ok(Self {
            store,
            staged,
            released: false,
        })
    }

    pub async fn size_on_disk(&self) -> Result<u64, StorageError> {
        self.store.staged_len(&self.staged).await
    }

    pub async fn read(&self) -> Result<Vec<u8>, StorageError> {
        self.store.read(&self.staged).await
    }

    /// Release the artifact now instead of at end of scope
    pub fn release(mut self) {
        self.release_once();
    }

    fn release_once(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.store.release(&self.staged);
    }
}

impl<S: AudioStore + ?Sized> Drop for StagedArtifact<'_, S> {
    fn drop(&mut self) {
        self.release_once();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::domain::transcription::AudioMimeType;

    #[derive(Default)]
    struct CountingStore {
        released: AtomicUsize,
    }

    #[async_trait]
    impl AudioStore for CountingStore {
        async fn stage(&self, audio: &AudioData) -> Result<StagedAudio, StorageError> {
            Ok(StagedAudio::new("/tmp/audio-test", audio.mime_type().clone()))
        }

        async fn staged_len(&self, _staged: &StagedAudio) -> Result<u64, StorageError> {
            Ok(0)
        }

        async fn read(&self, _staged: &StagedAudio) -> Result<Vec<u8>, StorageError> {
            Ok(Vec::new())
        }

        fn release(&self, _staged: &StagedAudio) {
            self.released.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn audio() -> AudioData {
        AudioData::new(vec![1, 2, 3], AudioMimeType::Webm)
    }

    #[tokio::test]
    async fn explicit_release_runs_once() {
        let store = CountingStore::default();
        let artifact = StagedArtifact::acquire(&store, &audio()).await.unwrap();
        artifact.release();
        assert_eq!(store.released.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn drop_releases() {
        let store = CountingStore::default();
        {
            let _artifact = StagedArtifact::acquire(&store, &audio()).await.unwrap();
        }
        assert_eq!(store.released.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn early_return_releases() {
        async fn fails_midway(store: &CountingStore) -> Result<(), StorageError> {
            let artifact = StagedArtifact::acquire(store, &audio()).await?;
            artifact.size_on_disk().await?;
            Err(StorageError::ReadFailed("boom".to_string()))
        }

        let store = CountingStore::default();
        assert!(fails_midway(&store).await.is_err());
        assert_eq!(store.released.load(Ordering::SeqCst), 1);
    }
}
