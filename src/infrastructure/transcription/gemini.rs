//! Gemini API transcriber adapter

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::{Transcriber, TranscriptionError};
use crate::domain::config::DEFAULT_MODEL;
use crate::domain::transcription::{AudioData, RawModelResponse, TranscriptionPrompt};

/// Gemini API base URL
const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Low randomness keeps the reply close to the requested JSON shape
const TEMPERATURE: f32 = 0.4;
const TOP_P: f32 = 0.8;
const MAX_OUTPUT_TOKENS: u32 = 2048;

// Request types for Gemini API

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    max_output_tokens: u32,
}

// Response types for Gemini API

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<ResponsePart>>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
    status: Option<String>,
    code: Option<i32>,
}

impl ApiError {
    fn into_transcription_error(self) -> TranscriptionError {
        match (self.status.as_deref(), self.code) {
            (Some("UNAUTHENTICATED" | "PERMISSION_DENIED"), _) | (_, Some(401 | 403)) => {
                TranscriptionError::InvalidApiKey
            }
            (Some("RESOURCE_EXHAUSTED"), _) | (_, Some(429)) => TranscriptionError::QuotaExceeded,
            _ if self.message.contains("API key not valid") => TranscriptionError::InvalidApiKey,
            _ => TranscriptionError::ApiError(self.message),
        }
    }
}

/// Gemini API transcriber
pub struct GeminiTranscriber {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiTranscriber {
    /// Create a new Gemini transcriber with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_model(api_key, DEFAULT_MODEL)
    }

    /// Create a new Gemini transcriber with a custom model
    pub fn with_model(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: API_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Point the transcriber at a different API root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Build the API URL
    fn api_url(&self) -> String {
        format!(
            "{}/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }

    /// Build the request body
    fn build_request(
        &self,
        audio: &AudioData,
        prompt: &TranscriptionPrompt,
    ) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![
                    Part {
                        text: Some(prompt.content().to_string()),
                        inline_data: None,
                    },
                    Part {
                        text: None,
                        inline_data: Some(InlineData {
                            mime_type: audio.mime_type().to_string(),
                            data: audio.to_base64(),
                        }),
                    },
                ],
            }],
            generation_config: Some(GenerationConfig {
                temperature: TEMPERATURE,
                top_p: TOP_P,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            }),
        }
    }

    /// Extract text from the first candidate.
    /// `None` when there is no candidate at all; an empty string when it has no text.
    fn extract_text(response: &GenerateContentResponse) -> Option<String> {
        let candidate = response.candidates.as_ref()?.first()?;
        let text = candidate
            .content
            .as_ref()
            .and_then(|c| c.parts.as_ref())
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default();
        Some(text)
    }

    /// The deadline is enforced by the caller, so every send error is a request failure
    fn map_request_error(err: reqwest::Error) -> TranscriptionError {
        // reqwest includes the URL, which carries the API key
        TranscriptionError::RequestFailed(err.without_url().to_string())
    }
}

#[async_trait]
impl Transcriber for GeminiTranscriber {
    async fn transcribe(
        &self,
        audio: &AudioData,
        prompt: &TranscriptionPrompt,
    ) -> Result<RawModelResponse, TranscriptionError> {
        let url = self.api_url();
        let body = self.build_request(audio, prompt);

        tracing::debug!(model = %self.model, "sending generateContent request");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(Self::map_request_error)?;

        let status = response.status();

        // Handle HTTP errors
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(TranscriptionError::InvalidApiKey);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TranscriptionError::QuotaExceeded);
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(&error_text) {
                return Err(envelope.error.into_transcription_error());
            }
            return Err(TranscriptionError::ApiError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        // Parse response
        let response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::ParseError(e.without_url().to_string()))?;

        // Check for API error in response body
        if let Some(error) = response.error {
            return Err(error.into_transcription_error());
        }

        let text = Self::extract_text(&response).ok_or(TranscriptionError::EmptyResponse)?;

        Ok(RawModelResponse::new(text))
    }
}
