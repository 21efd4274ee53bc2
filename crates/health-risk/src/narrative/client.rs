//! Text-generation backends.
//!
//! [`GeminiClient`] talks to the Google Gemini `generateContent` endpoint.
//! Every failure is reported as a [`GenerationError`]; callers that need plain
//! text use [`generate_text_or_fallback`] or [`GenerationError::fallback_text`].

use crate::config::NarrativeConfig;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

pub const MISSING_CREDENTIAL_MESSAGE: &str =
    "AI explanation unavailable. Please configure the GEMINI_API_KEY environment variable.";
pub const RATE_LIMITED_MESSAGE: &str = "API rate limit or quota exceeded. Please try again in a minute, or check your Gemini API quota at https://ai.google.dev/gemini-api/docs/rate-limits";
pub const TEMPORARILY_UNAVAILABLE_MESSAGE: &str =
    "AI explanation temporarily unavailable. Please try again in a moment.";
pub const EMPTY_RESPONSE_MESSAGE: &str = "No response generated.";

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("GEMINI_API_KEY is not configured")]
    MissingCredential,
    #[error("text generation rate limit or quota exceeded")]
    RateLimited,
    #[error("text generation service returned HTTP {status}")]
    Upstream { status: u16 },
    #[error("text generation request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("unreadable text generation response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("text generation response contained no text")]
    EmptyResponse,
}

impl GenerationError {
    /// User-facing text rendered in place of generated narrative.
    pub fn fallback_text(&self) -> &'static str {
        match self {
            GenerationError::MissingCredential => MISSING_CREDENTIAL_MESSAGE,
            GenerationError::RateLimited => RATE_LIMITED_MESSAGE,
            GenerationError::EmptyResponse => EMPTY_RESPONSE_MESSAGE,
            GenerationError::Upstream { .. }
            | GenerationError::Transport(_)
            | GenerationError::Decode(_) => TEMPORARILY_UNAVAILABLE_MESSAGE,
        }
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the API key as a query parameter.
        Self::Transport(err.without_url())
    }
}

/// Backend turning a complete prompt into generated text.
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Generated text, or the fallback string for whatever went wrong. Never fails.
pub async fn generate_text_or_fallback(generator: &dyn TextGenerator, prompt: &str) -> String {
    match generator.generate(prompt).await {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!(error = %err, "narrative generation degraded to fallback text");
            err.fallback_text().to_string()
        }
    }
}

pub struct GeminiClient {
    api_key: Option<String>,
    model: String,
    base_url: String,
    temperature: f32,
    max_output_tokens: u32,
    client: reqwest::Client,
}

impl GeminiClient {
    /// Fails with [`GenerationError::Transport`] when the HTTP client cannot
    /// be built with the configured timeout.
    pub fn new(config: &NarrativeConfig) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
            client,
        })
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("has_credential", &self.has_credential())
            .finish_non_exhaustive()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationSettings,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationSettings {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    fn into_first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}

#[async_trait::async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(GenerationError::MissingCredential);
        };

        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationSettings {
                temperature: self.temperature,
                max_output_tokens: self.max_output_tokens,
            },
        };

        let resp = self
            .client
            .post(self.endpoint())
            .query(&[("key", api_key)])
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            tracing::error!(status = status.as_u16(), body = %body, "gemini api error");
            if status == StatusCode::TOO_MANY_REQUESTS {
                return Err(GenerationError::RateLimited);
            }
            return Err(GenerationError::Upstream {
                status: status.as_u16(),
            });
        }

        let response: GenerateContentResponse = serde_json::from_str(&body)?;
        response
            .into_first_text()
            .map(|text| text.trim().to_string())
            .ok_or(GenerationError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_body_matches_generate_content_shape() {
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: "hello" }],
            }],
            generation_config: GenerationSettings {
                temperature: 0.5,
                max_output_tokens: 300,
            },
        };
        let value = serde_json::to_value(&request).expect("serializes");
        assert_eq!(
            value,
            json!({
                "contents": [{ "parts": [{ "text": "hello" }] }],
                "generationConfig": { "temperature": 0.5, "maxOutputTokens": 300 }
            })
        );
    }

    #[test]
    fn extracts_first_candidate_text() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "parts": [{ "text": "first" }, { "text": "second" }] } },
                { "content": { "parts": [{ "text": "other" }] } }
            ]
        }))
        .expect("parses");
        assert_eq!(response.into_first_text().as_deref(), Some("first"));
    }

    #[test]
    fn missing_candidates_yield_no_text() {
        let response: GenerateContentResponse =
            serde_json::from_value(json!({ "promptFeedback": { "blockReason": "SAFETY" } }))
                .expect("parses");
        assert!(response.into_first_text().is_none());

        let response: GenerateContentResponse =
            serde_json::from_value(json!({ "candidates": [{ "finishReason": "SAFETY" }] }))
                .expect("parses");
        assert!(response.into_first_text().is_none());
    }

    #[test]
    fn each_failure_maps_to_one_of_four_messages() {
        assert_eq!(
            GenerationError::MissingCredential.fallback_text(),
            MISSING_CREDENTIAL_MESSAGE
        );
        assert_eq!(
            GenerationError::RateLimited.fallback_text(),
            RATE_LIMITED_MESSAGE
        );
        assert_eq!(
            GenerationError::Upstream { status: 503 }.fallback_text(),
            TEMPORARILY_UNAVAILABLE_MESSAGE
        );
        assert_eq!(
            GenerationError::EmptyResponse.fallback_text(),
            EMPTY_RESPONSE_MESSAGE
        );
    }

    #[tokio::test]
    async fn missing_key_short_circuits_before_any_request() {
        let config = NarrativeConfig {
            api_key: None,
            base_url: "http://127.0.0.1:9".to_string(),
            ..NarrativeConfig::default()
        };
        let client = GeminiClient::new(&config).expect("client builds");
        assert!(!client.has_credential());

        let text = generate_text_or_fallback(&client, "prompt").await;
        assert_eq!(text, MISSING_CREDENTIAL_MESSAGE);
    }
}
