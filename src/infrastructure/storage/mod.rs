//! Request-scoped audio storage adapters

mod temp_dir;

pub use temp_dir::TempDirAudioStore;
