//! Voice Notes - spoken audio to titled notes over HTTP
//!
//! Accepts an audio upload, sends it to Google Gemini with a fixed
//! instruction, and turns whatever text comes back into a `{title, content}`
//! note. Uploads are staged on disk for the duration of one request and
//! removed on every exit path.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Value objects, the response normalizer, and errors
//! - **Application**: The audio pipeline use case and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (Gemini, upload directory, config file, logging)
//! - **Server**: axum router, multipart handler, and response mapping
//! - **CLI**: Command-line interface, argument parsing, and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod server;
