//! Configuration domain module

mod app_config;

pub use app_config::{
    AppConfig, LogFormat, DEFAULT_HOST, DEFAULT_MAX_UPLOAD_MB, DEFAULT_MODEL, DEFAULT_PORT,
    DEFAULT_TIMEOUT_SECS, DEFAULT_UPLOAD_DIR,
};
