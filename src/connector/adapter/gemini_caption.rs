use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::application::CaptionService;
use crate::domain::DomainError;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const API_PATH: &str = "/v1beta/models";
const MAX_OUTPUT_TOKENS: u32 = 200;

#[derive(serde::Serialize)]
struct CaptionRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(serde::Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(serde::Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text {
        text: &'a str,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(serde::Serialize)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: &'static str,
    data: String,
}

#[derive(serde::Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct CaptionResponse {
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

/// [`CaptionService`] backed by a vision-capable Gemini model. Image bytes
/// travel inline as base64; the caption comes back as plain text for the
/// caller to fold into the search query.
pub struct GeminiCaption {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiCaption {
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

    /// Reads `GEMINI_API_KEY` (required), `GEMINI_VISION_MODEL` and
    /// `GEMINI_BASE_URL` (optional).
    pub fn from_env() -> Option<Self> {
        let key = std::env::var("GEMINI_API_KEY").ok()?;
        let model = std::env::var("GEMINI_VISION_MODEL")
            .unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base =
            std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Some(Self::new(key, model, base))
    }

    fn endpoint(&self) -> String {
        format!("{}{}/{}:generateContent", self.base_url, API_PATH, self.model)
    }
}

#[async_trait]
impl CaptionService for GeminiCaption {
    async fn caption(&self, image: &[u8], prompt: &str) -> Result<String, DomainError> {
        debug!("Captioning image ({} bytes)", image.len());

        let request = CaptionRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text { text: prompt },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: "image/jpeg",
                            data: BASE64.encode(image),
                        },
                    },
                ],
            }],
            generation_config: GenerationConfig {
                temperature: 0.4,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::internal(format!("GeminiCaption: request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("GeminiCaption: API returned {status}: {body}");
            return Err(DomainError::internal(format!(
                "GeminiCaption: API returned {status}"
            )));
        }

        let api_response: CaptionResponse = response.json().await.map_err(|e| {
            DomainError::internal(format!("GeminiCaption: failed to parse response: {e}"))
        })?;

        let description = api_response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| DomainError::internal("GeminiCaption: empty response"))?;

        Ok(description)
    }
}
