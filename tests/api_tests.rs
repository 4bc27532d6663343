//! HTTP surface tests: router driven in-process, Gemini mocked

use std::path::Path;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use voice_notes::application::{ProcessAudioOptions, ProcessAudioUseCase};
use voice_notes::infrastructure::{GeminiTranscriber, TempDirAudioStore};
use voice_notes::server::{create_router, AppState, HEALTH_PATH, PROCESS_AUDIO_PATH};

const BOUNDARY: &str = "voice-notes-test-boundary";
const MODEL_PATH: &str = "/models/gemini-2.0-flash:generateContent";

struct Harness {
    router: Router,
    upload_dir: tempfile::TempDir,
    _server: Option<MockServer>,
}

impl Harness {
    /// Service whose model replies with `text`
    async fn replying(text: &str) -> Self {
        Self::with_response(
            ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "content": { "parts": [{ "text": text }] } }]
            })),
            false,
        )
        .await
    }

    async fn with_response(response: ResponseTemplate, dev_mode: bool) -> Self {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(response)
            .mount(&server)
            .await;

        let transcriber =
            GeminiTranscriber::new("test-key").with_base_url(format!("{}/models", server.uri()));
        let mut harness = Self::build(Some(transcriber), ProcessAudioOptions::default(), dev_mode);
        harness._server = Some(server);
        harness
    }

    fn build(
        transcriber: Option<GeminiTranscriber>,
        options: ProcessAudioOptions,
        dev_mode: bool,
    ) -> Self {
        let upload_dir = tempfile::tempdir().unwrap();
        let store = TempDirAudioStore::new(upload_dir.path().join("uploads"));
        let use_case = ProcessAudioUseCase::new(transcriber, store, options);
        Self {
            router: create_router(AppState::new(use_case, dev_mode)),
            upload_dir,
            _server: None,
        }
    }

    async fn post(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn staged_files(&self) -> usize {
        count_files(&self.upload_dir.path().join("uploads"))
    }
}

fn count_files(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
}

fn multipart_body(field: &str, file_name: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(PROCESS_AUDIO_PATH)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn audio_request(content_type: &str, data: &[u8]) -> Request<Body> {
    upload_request(multipart_body("audio", "recording.webm", content_type, data))
}

fn assert_failure_shape(body: &Value) {
    assert_eq!(body["title"], "Audio Processing Failed");
    assert!(body["content"].as_str().unwrap().contains("try again"));
}

#[tokio::test]
async fn valid_json_reply_becomes_note() {
    let harness =
        Harness::replying(r#"{"title":"Groceries","content":"Buy milk and eggs."}"#).await;

    let (status, body) = harness.post(audio_request("audio/webm", b"OggS-not-really")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Groceries");
    assert_eq!(body["content"], "Buy milk and eggs.");
    assert_eq!(body["message"], "Audio processed successfully");
    assert_eq!(harness.staged_files(), 0);
}

#[tokio::test]
async fn fenced_reply_is_unwrapped() {
    let reply = "```json\n{\"title\": \"Standup\", \"content\": \"Ship the release on Friday.\"}\n```";
    let harness = Harness::replying(reply).await;

    let (status, body) = harness
        .post(audio_request("audio/ogg; codecs=opus", b"\x01\x02\x03"))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Standup");
    assert_eq!(body["content"], "Ship the release on Friday.");
}

#[tokio::test]
async fn prose_reply_falls_back_to_heuristics() {
    let harness =
        Harness::replying("Weekend plans\nHike the ridge trail and pack a lunch.").await;

    let (status, body) = harness.post(audio_request("video/webm", b"\x1a\x45\xdf\xa3")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Weekend plans");
    assert!(body["content"]
        .as_str()
        .unwrap()
        .contains("Hike the ridge trail"));
}

#[tokio::test]
async fn missing_audio_field_is_rejected() {
    let harness = Harness::replying("unused").await;

    let body = multipart_body("attachment", "recording.webm", "audio/webm", b"abc");
    let (status, body) = harness.post(upload_request(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "No audio file provided");
    assert_failure_shape(&body);
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn non_multipart_request_is_missing_file() {
    let harness = Harness::replying("unused").await;

    let request = Request::builder()
        .method("POST")
        .uri(PROCESS_AUDIO_PATH)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .unwrap();
    let (status, body) = harness.post(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "No audio file provided");
}

#[tokio::test]
async fn non_audio_upload_is_rejected_before_staging() {
    let harness = Harness::replying("unused").await;

    let (status, body) = harness.post(audio_request("text/plain", b"hello")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Only audio files are allowed");
    assert_eq!(harness.staged_files(), 0);
}

#[tokio::test]
async fn empty_upload_is_rejected_and_cleaned_up() {
    let harness = Harness::replying("unused").await;

    let (status, body) = harness.post(audio_request("audio/webm", b"")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Audio file is empty");
    assert_eq!(harness.staged_files(), 0);
}

#[tokio::test]
async fn oversized_upload_is_rejected() {
    let options = ProcessAudioOptions {
        max_upload_bytes: 16,
        timeout: Duration::from_secs(5),
    };
    let harness = Harness::build(Some(GeminiTranscriber::new("unused")), options, false);

    let (status, body) = harness.post(audio_request("audio/webm", &[0u8; 64])).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Audio file exceeds the"));
    assert_eq!(harness.staged_files(), 0);
}

#[tokio::test]
async fn missing_credential_is_configuration_error() {
    let harness = Harness::build(None, ProcessAudioOptions::default(), false);

    let (status, body) = harness.post(audio_request("audio/webm", b"abc")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "AI service configuration error");
    assert_failure_shape(&body);
}

#[tokio::test]
async fn missing_file_is_client_error_without_credential() {
    let harness = Harness::build(None, ProcessAudioOptions::default(), false);

    let body = multipart_body("attachment", "recording.webm", "audio/webm", b"abc");
    let (status, body) = harness.post(upload_request(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "No audio file provided");
    assert_eq!(harness.staged_files(), 0);
}

#[tokio::test]
async fn quota_failure_is_service_unavailable_and_cleaned_up() {
    let harness = Harness::with_response(ResponseTemplate::new(429), false).await;

    let (status, body) = harness.post(audio_request("audio/webm", b"abc")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        body["message"],
        "AI service temporarily unavailable due to quota limits"
    );
    assert!(body.get("error").is_none());
    assert_eq!(harness.staged_files(), 0);
}

#[tokio::test]
async fn dev_mode_exposes_error_detail() {
    let harness = Harness::with_response(ResponseTemplate::new(429), true).await;

    let (status, body) = harness.post(audio_request("audio/webm", b"abc")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"].as_str().unwrap().contains("Quota"));
}

#[tokio::test]
async fn health_check() {
    let harness = Harness::build(None, ProcessAudioOptions::default(), false);

    let response = harness
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri(HEALTH_PATH)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"ok");
}
