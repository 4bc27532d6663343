use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{AudioStore, Transcriber};

use super::handlers::{health_handler, process_audio_handler};
use super::state::AppState;

/// Headroom above the ingestion cap for multipart framing
const BODY_LIMIT_HEADROOM: usize = 5 * 1024 * 1024;

pub const PROCESS_AUDIO_PATH: &str = "/api/notes/process-audio";
pub const HEALTH_PATH: &str = "/healthz";

pub fn create_router<T, S>(state: AppState<T, S>) -> Router
where
    T: Transcriber + 'static,
    S: AudioStore + 'static,
{
    let body_limit = state.use_case.max_upload_bytes() + BODY_LIMIT_HEADROOM;

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route(HEALTH_PATH, get(health_handler))
        .route(PROCESS_AUDIO_PATH, post(process_audio_handler::<T, S>))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(trace_layer)
        .with_state(state)
}
