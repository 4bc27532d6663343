//! JSON bodies and error classification for the HTTP surface

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::application::ports::TranscriptionError;
use crate::application::ProcessAudioError;
use crate::domain::error::ValidationError;
use crate::domain::note::NotePayload;

pub const SUCCESS_MESSAGE: &str = "Audio processed successfully";
pub const FAILURE_TITLE: &str = "Audio Processing Failed";
pub const RETRY_GUIDANCE: &str =
    "The audio could not be processed at this time. Please try again with a shorter, clearer recording.";

const MIB: usize = 1024 * 1024;

/// 200 body
#[derive(Debug, Serialize, Deserialize)]
pub struct NoteResponse {
    pub title: String,
    pub content: String,
    pub message: String,
}

impl From<NotePayload> for NoteResponse {
    fn from(note: NotePayload) -> Self {
        Self {
            title: note.title,
            content: note.content,
            message: SUCCESS_MESSAGE.to_string(),
        }
    }
}

/// Failure body. `title` and `content` are always filled so clients can
/// render it like a note.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A classified failure, ready to render
#[derive(Debug)]
pub struct ApiFailure {
    pub status: StatusCode,
    pub message: String,
    pub detail: String,
}

impl ApiFailure {
    pub fn new(status: StatusCode, message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            detail: detail.into(),
        }
    }

    /// Render the body. Internal detail is only exposed in development mode.
    pub fn into_response(self, dev_mode: bool) -> Response {
        let body = ErrorResponse {
            message: self.message,
            title: FAILURE_TITLE.to_string(),
            content: RETRY_GUIDANCE.to_string(),
            error: dev_mode.then_some(self.detail),
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<&ValidationError> for ApiFailure {
    fn from(err: &ValidationError) -> Self {
        let (status, message) = match err {
            ValidationError::MissingFile => {
                (StatusCode::BAD_REQUEST, "No audio file provided".to_string())
            }
            ValidationError::EmptyFile => (StatusCode::BAD_REQUEST, "Audio file is empty".to_string()),
            ValidationError::UnsupportedMediaType { .. } => (
                StatusCode::BAD_REQUEST,
                "Only audio files are allowed".to_string(),
            ),
            ValidationError::FileTooLarge { limit, .. } => (
                StatusCode::PAYLOAD_TOO_LARGE,
                format!("Audio file exceeds the {} MB limit", limit / MIB),
            ),
        };
        Self::new(status, message, err.to_string())
    }
}

impl From<&TranscriptionError> for ApiFailure {
    fn from(err: &TranscriptionError) -> Self {
        // Worth retrying later: 503. Anything else is our side: 500.
        let status = if err.is_transient() {
            StatusCode::SERVICE_UNAVAILABLE
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        let message = match err {
            TranscriptionError::QuotaExceeded => {
                "AI service temporarily unavailable due to quota limits"
            }
            TranscriptionError::InvalidApiKey => "AI service configuration error",
            _ => "AI service unavailable",
        };
        Self::new(status, message, err.to_string())
    }
}

impl From<&ProcessAudioError> for ApiFailure {
    fn from(err: &ProcessAudioError) -> Self {
        match err {
            ProcessAudioError::Validation(e) => e.into(),
            ProcessAudioError::Transcription(e) => e.into(),
            ProcessAudioError::ServiceConfiguration => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "AI service configuration error",
                err.to_string(),
            ),
            ProcessAudioError::Storage(e) => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to process audio",
                e.to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::StorageError;

    fn classify(err: ProcessAudioError) -> (StatusCode, String) {
        let failure = ApiFailure::from(&err);
        (failure.status, failure.message)
    }

    #[test]
    fn validation_errors_are_client_errors() {
        assert_eq!(
            classify(ValidationError::MissingFile.into()),
            (StatusCode::BAD_REQUEST, "No audio file provided".to_string())
        );
        assert_eq!(
            classify(ValidationError::EmptyFile.into()),
            (StatusCode::BAD_REQUEST, "Audio file is empty".to_string())
        );
        assert_eq!(
            classify(
                ValidationError::UnsupportedMediaType {
                    mime_type: "text/plain".to_string()
                }
                .into()
            ),
            (
                StatusCode::BAD_REQUEST,
                "Only audio files are allowed".to_string()
            )
        );
    }

    #[test]
    fn oversized_upload_reports_cap_in_megabytes() {
        let err = ValidationError::FileTooLarge {
            size: 30 * MIB,
            limit: 25 * MIB,
        };
        assert_eq!(
            classify(err.into()),
            (
                StatusCode::PAYLOAD_TOO_LARGE,
                "Audio file exceeds the 25 MB limit".to_string()
            )
        );
    }

    #[test]
    fn service_failures_are_classified() {
        assert_eq!(
            classify(ProcessAudioError::ServiceConfiguration).1,
            "AI service configuration error"
        );
        assert_eq!(
            classify(TranscriptionError::QuotaExceeded.into()),
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "AI service temporarily unavailable due to quota limits".to_string()
            )
        );
        assert_eq!(
            classify(TranscriptionError::Timeout(60).into()).0,
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            classify(TranscriptionError::RequestFailed("reset".to_string()).into()),
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "AI service unavailable".to_string()
            )
        );
        assert_eq!(
            classify(StorageError::WriteFailed("disk full".to_string()).into()).1,
            "Failed to process audio"
        );
    }

    #[test]
    fn only_transient_service_failures_are_unavailable() {
        let failures = [
            TranscriptionError::InvalidApiKey,
            TranscriptionError::QuotaExceeded,
            TranscriptionError::Timeout(60),
            TranscriptionError::EmptyResponse,
            TranscriptionError::RequestFailed("reset".to_string()),
            TranscriptionError::ParseError("eof".to_string()),
            TranscriptionError::ApiError("500".to_string()),
        ];

        for err in failures {
            let expected = if err.is_transient() {
                StatusCode::SERVICE_UNAVAILABLE
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            assert_eq!(ApiFailure::from(&err).status, expected, "{err:?}");
        }
        assert!(TranscriptionError::Timeout(60).is_transient());
        assert!(!TranscriptionError::InvalidApiKey.is_transient());
    }

    #[test]
    fn error_body_hides_detail_outside_dev_mode() {
        let body = ErrorResponse {
            message: "AI service unavailable".to_string(),
            title: FAILURE_TITLE.to_string(),
            content: RETRY_GUIDANCE.to_string(),
            error: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("error").is_none());
        assert_eq!(json["title"], "Audio Processing Failed");
    }

    #[test]
    fn success_body_carries_fixed_message() {
        let response = NoteResponse::from(NotePayload::new("T", "C"));
        assert_eq!(response.message, "Audio processed successfully");
        assert_eq!(response.title, "T");
    }
}
