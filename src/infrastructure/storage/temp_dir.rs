//! Upload directory audio store adapter

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use tokio::fs;
use uuid::Uuid;

use crate::application::ports::{AudioStore, StagedAudio, StorageError};
use crate::domain::transcription::AudioData;

/// Stores each upload as its own file in a scratch directory
pub struct TempDirAudioStore {
    dir: PathBuf,
}

impl TempDirAudioStore {
    /// Create a store rooted at `dir`. The directory is created on first use.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `audio-<unix millis>-<uuid>.<ext>`: unique across concurrent requests
    fn artifact_name(extension: &str) -> String {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        format!("audio-{}-{}.{}", millis, Uuid::new_v4().simple(), extension)
    }
}

/// Owns a file until its write is handed off as a [`StagedAudio`].
///
/// Dropping it before [`PendingWrite::complete`] (write error, or the stage
/// future being cancelled) removes the file and flags the blocking writer,
/// which removes the file again if it finishes afterwards.
struct PendingWrite {
    path: PathBuf,
    abandoned: Arc<AtomicBool>,
    completed: bool,
}

impl PendingWrite {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            abandoned: Arc::new(AtomicBool::new(false)),
            completed: false,
        }
    }

    fn abandoned_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.abandoned)
    }

    fn complete(mut self) -> PathBuf {
        self.completed = true;
        std::mem::take(&mut self.path)
    }
}

impl Drop for PendingWrite {
    fn drop(&mut self) {
        if self.completed {
            return;
        }
        self.abandoned.store(true, Ordering::SeqCst);
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "removed unfinished audio artifact"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "failed to remove unfinished audio artifact"
            ),
        }
    }
}

/// Write on the blocking pool. The write outlives a cancelled caller, so it
/// cleans up after itself once `abandoned` is set.
fn write_blocking(path: &Path, data: &[u8], abandoned: &AtomicBool) -> std::io::Result<()> {
    let result = std::fs::write(path, data);
    if abandoned.load(Ordering::SeqCst) {
        let _ = std::fs::remove_file(path);
    }
    result
}

#[async_trait]
impl AudioStore for TempDirAudioStore {
    async fn stage(&self, audio: &AudioData) -> Result<StagedAudio, StorageError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StorageError::DirectoryUnavailable(e.to_string()))?;

        let path = self
            .dir
            .join(Self::artifact_name(audio.mime_type().extension()));
        let pending = PendingWrite::new(path.clone());
        let abandoned = pending.abandoned_flag();
        let data = audio.data().to_vec();

        tokio::task::spawn_blocking(move || write_blocking(&path, &data, &abandoned))
            .await
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;

        Ok(StagedAudio::new(pending.complete(), audio.mime_type().clone()))
    }

    async fn staged_len(&self, staged: &StagedAudio) -> Result<u64, StorageError> {
        let metadata = fs::metadata(staged.path())
            .await
            .map_err(|e| StorageError::NotFound(e.to_string()))?;
        Ok(metadata.len())
    }

    async fn read(&self, staged: &StagedAudio) -> Result<Vec<u8>, StorageError> {
        fs::read(staged.path())
            .await
            .map_err(|e| StorageError::ReadFailed(e.to_string()))
    }

    fn release(&self, staged: &StagedAudio) {
        match std::fs::remove_file(staged.path()) {
            Ok(()) => tracing::debug!(path = %staged.path().display(), "removed audio artifact"),
            Err(e) => tracing::warn!(
                path = %staged.path().display(),
                error = %e,
                "failed to remove audio artifact"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use crate::domain::transcription::AudioMimeType;

    #[test]
    fn artifact_names_are_unique() {
        let a = TempDirAudioStore::artifact_name("webm");
        let b = TempDirAudioStore::artifact_name("webm");
        assert_ne!(a, b);
        assert!(a.starts_with("audio-"));
        assert!(a.ends_with(".webm"));
    }

    #[tokio::test]
    async fn stage_read_and_release() {
        let dir = tempfile::tempdir().unwrap();
        let store = TempDirAudioStore::new(dir.path().join("uploads"));
        let audio = AudioData::new(vec![1, 2, 3, 4], AudioMimeType::Ogg);

        let staged = store.stage(&audio).await.unwrap();
        assert!(staged.path().starts_with(store.dir()));
        assert_eq!(staged.path().extension().unwrap(), "ogg");
        assert_eq!(store.staged_len(&staged).await.unwrap(), 4);
        assert_eq!(store.read(&staged).await.unwrap(), vec![1, 2, 3, 4]);

        store.release(&staged);
        assert!(!staged.path().exists());
    }

    #[tokio::test]
    async fn empty_audio_stages_zero_length_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = TempDirAudioStore::new(dir.path());
        let staged = store
            .stage(&AudioData::new(Vec::new(), AudioMimeType::Webm))
            .await
            .unwrap();
        assert_eq!(store.staged_len(&staged).await.unwrap(), 0);
        store.release(&staged);
    }

    fn file_count(dir: &Path) -> usize {
        std::fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn cancelled_stage_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = TempDirAudioStore::new(dir.path());
        let audio = AudioData::new(vec![0u8; 16 * 1024 * 1024], AudioMimeType::Webm);

        for _ in 0..10 {
            let attempt =
                tokio::time::timeout(Duration::from_micros(200), store.stage(&audio)).await;
            if let Ok(Ok(staged)) = attempt {
                store.release(&staged);
            }
        }

        // Abandoned writes finish on the blocking pool before cleaning up
        let deadline = Instant::now() + Duration::from_secs(10);
        while file_count(dir.path()) > 0 && Instant::now() < deadline {
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        assert_eq!(file_count(dir.path()), 0);
    }

    #[test]
    fn dropped_pending_write_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audio-partial.webm");
        std::fs::write(&path, b"half").unwrap();

        let pending = PendingWrite::new(path.clone());
        let abandoned = pending.abandoned_flag();
        drop(pending);

        assert!(!path.exists());
        assert!(abandoned.load(Ordering::SeqCst));
    }

    #[test]
    fn abandoned_writer_removes_its_own_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audio-late.webm");

        write_blocking(&path, b"late bytes", &AtomicBool::new(true)).unwrap();
        assert!(!path.exists());

        write_blocking(&path, b"kept bytes", &AtomicBool::new(false)).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn completed_pending_write_keeps_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audio-done.webm");
        std::fs::write(&path, b"done").unwrap();

        let kept = PendingWrite::new(path.clone()).complete();

        assert_eq!(kept, path);
        assert!(path.exists());
    }

    #[tokio::test]
    async fn unusable_directory_stages_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"x").unwrap();
        let store = TempDirAudioStore::new(&blocker);

        let err = store
            .stage(&AudioData::new(vec![1], AudioMimeType::Webm))
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::DirectoryUnavailable(_)));
        assert_eq!(file_count(dir.path()), 1);
    }

    #[test]
    fn release_of_missing_file_does_not_panic() {
        let store = TempDirAudioStore::new("/nonexistent");
        store.release(&StagedAudio::new(
            "/nonexistent/audio-0.webm",
            AudioMimeType::Webm,
        ));
    }
}
