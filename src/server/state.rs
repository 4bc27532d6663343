//! Shared handler state

use std::sync::Arc;

use crate::application::ports::{AudioStore, Transcriber};
use crate::application::ProcessAudioUseCase;

pub struct AppState<T, S>
where
    T: Transcriber,
    S: AudioStore,
{
    pub use_case: Arc<ProcessAudioUseCase<T, S>>,
    /// Expose internal error detail in failure bodies
    pub dev_mode: bool,
}

impl<T, S> AppState<T, S>
where
    T: Transcriber,
    S: AudioStore,
{
    pub fn new(use_case: ProcessAudioUseCase<T, S>, dev_mode: bool) -> Self {
        Self {
            use_case: Arc::new(use_case),
            dev_mode,
        }
    }
}

impl<T, S> Clone for AppState<T, S>
where
    T: Transcriber,
    S: AudioStore,
{
    fn clone(&self) -> Self {
        Self {
            use_case: Arc::clone(&self.use_case),
            dev_mode: self.dev_mode,
        }
    }
}
