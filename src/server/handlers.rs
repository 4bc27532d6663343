//! Request handlers

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::application::ports::{AudioStore, Transcriber};
use crate::domain::error::ValidationError;
use crate::domain::transcription::AudioUpload;

use super::response::{ApiFailure, NoteResponse};
use super::state::AppState;

/// Multipart field carrying the recording
pub const AUDIO_FIELD: &str = "audio";

#[tracing::instrument(skip_all)]
pub async fn process_audio_handler<T, S>(
    State(state): State<AppState<T, S>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response
where
    T: Transcriber + 'static,
    S: AudioStore + 'static,
{
    let upload = match multipart {
        Ok(multipart) => match read_audio_field(multipart).await {
            Ok(upload) => upload,
            Err(e) => {
                let failure = multipart_failure(&e, state.use_case.max_upload_bytes());
                tracing::warn!(error = %e, status = %failure.status, "failed to read upload");
                return failure.into_response(state.dev_mode);
            }
        },
        Err(rejection) => {
            tracing::warn!(error = %rejection, "request is not multipart");
            None
        }
    };

    match state.use_case.execute(upload).await {
        Ok(processed) => {
            tracing::debug!(audio_size = %processed.audio_size, "note ready");
            (StatusCode::OK, Json(NoteResponse::from(processed.note))).into_response()
        }
        Err(e) => {
            let failure = ApiFailure::from(&e);
            if failure.status.is_server_error() {
                tracing::error!(error = %e, status = %failure.status, "audio processing failed");
            } else {
                tracing::warn!(error = %e, status = %failure.status, "upload rejected");
            }
            failure.into_response(state.dev_mode)
        }
    }
}

pub async fn health_handler() -> &'static str {
    "ok"
}

/// Pull the `audio` field out of the form, skipping any other fields
async fn read_audio_field(mut multipart: Multipart) -> Result<Option<AudioUpload>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(AUDIO_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let declared_type = field.content_type().map(str::to_string);
        let data = field.bytes().await?.to_vec();

        tracing::debug!(
            file_name = file_name.as_deref().unwrap_or("-"),
            declared_type = declared_type.as_deref().unwrap_or("-"),
            bytes = data.len(),
            "received audio field"
        );

        return Ok(Some(AudioUpload {
            file_name,
            declared_type,
            data,
        }));
    }
    Ok(None)
}

fn multipart_failure(err: &MultipartError, max_bytes: usize) -> ApiFailure {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ApiFailure::from(&ValidationError::FileTooLarge {
            size: 0,
            limit: max_bytes,
        });
    }
    ApiFailure::new(err.status(), "Failed to process audio", err.body_text())
}
