use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::connector::adapter::ChatClient;
use crate::domain::DomainError;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const API_PATH: &str = "/v1beta/models";

#[derive(serde::Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(serde::Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(serde::Serialize)]
struct Part<'a> {
    text: &'a str,
}

/// Minimal subset of the generateContent response we care about.
#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// HTTP client for the Gemini `generateContent` endpoint.
///
/// Implements [`ChatClient`] so higher-level components stay decoupled from
/// transport and serialization details. Every request carries a 30-second
/// timeout; a timed-out or failed call surfaces as an error rather than a
/// fabricated response.
///
/// **API key**: pass explicitly or read `GEMINI_API_KEY` via [`Self::from_env`].
/// **Base URL**: override with `GEMINI_BASE_URL` to target a compatible
/// mock server in tests or a regional endpoint.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let base: String = base_url.into();
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: base.trim_end_matches('/').to_string(),
        }
    }

    /// Construct from environment variables:
    /// - `GEMINI_API_KEY`  — required; returns `None` when absent
    /// - `GEMINI_MODEL`    — optional; defaults to `gemini-2.0-flash`
    /// - `GEMINI_BASE_URL` — optional
    pub fn from_env() -> Option<Self> {
        let key = std::env::var("GEMINI_API_KEY").ok()?;
        let model =
            std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base =
            std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Some(Self::new(key, model, base))
    }

    fn endpoint(&self) -> String {
        format!("{}{}/{}:generateContent", self.base_url, API_PATH, self.model)
    }
}

#[async_trait]
impl ChatClient for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, DomainError> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::internal(format!("GeminiClient: request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("GeminiClient: API returned {status}: {body}");
            return Err(DomainError::internal(format!(
                "GeminiClient: API returned {status}"
            )));
        }

        let api_response: GenerateResponse = response.json().await.map_err(|e| {
            DomainError::internal(format!("GeminiClient: failed to parse response: {e}"))
        })?;

        let text = api_response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| DomainError::internal("GeminiClient: empty response"))?;

        Ok(text)
    }
}
