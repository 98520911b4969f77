//! REST client for the Gemini `generateContent` endpoint.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// HTTP statuses treated as transient.
const TRANSIENT_STATUSES: &[u16] = &[429, 500, 503];

/// HTTP client for the hosted model API.
#[derive(Clone)]
pub struct GeminiApi {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, thiserror::Error)]
pub enum GeminiApiError {
    /// Network, DNS, TLS or body decoding failure.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Gemini API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// A successful response without any candidate text (e.g. blocked by
    /// safety filters).
    #[error("Gemini returned no text")]
    EmptyResponse,
}

impl GeminiApiError {
    /// Rate limiting, unavailability, internal errors and connection
    /// failures may succeed on a later attempt.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Api { status, .. } => TRANSIENT_STATUSES.contains(status),
            Self::Request(e) => e.is_connect() || e.is_timeout(),
            Self::EmptyResponse => false,
        }
    }
}

/// One content part of a request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Part {
    Text(String),
    InlineData { mime_type: String, data: String },
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Inline binary payload, base64-encoded.
    pub fn inline(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self::InlineData {
            mime_type: mime_type.into(),
            data: STANDARD.encode(bytes),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: &'a [Part],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GeminiApi {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, api_key)
    }

    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Run one `generateContent` call and return the concatenated text of
    /// the first candidate.
    ///
    /// `response_mime_type` asks the model for a specific output format,
    /// e.g. `application/json`.
    pub async fn generate_content(
        &self,
        model: &str,
        parts: &[Part],
        response_mime_type: Option<&str>,
    ) -> Result<String, GeminiApiError> {
        let body = GenerateRequest {
            contents: [Content { parts }],
            generation_config: response_mime_type.map(|m| GenerationConfig {
                response_mime_type: m,
            }),
        };

        let response = self
            .client
            .post(format!("{}/v1beta/models/{model}:generateContent", self.base_url))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GeminiApiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        candidate_text(parsed).ok_or(GeminiApiError::EmptyResponse)
    }
}

fn candidate_text(response: GenerateResponse) -> Option<String> {
    let content = response.candidates.into_iter().next()?.content?;
    let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
    (!text.trim().is_empty()).then_some(text)
}
