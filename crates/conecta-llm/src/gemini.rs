use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use conecta_core::errors::ProviderError;

use crate::generator::TextGenerator;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Non-streaming `generateContent` client for the generative-language API.
pub struct GeminiGenerator {
    client: Client,
    api_key: SecretString,
    model: String,
    temperature: Option<f64>,
    max_output_tokens: Option<u32>,
}

impl GeminiGenerator {
    pub fn new(api_key: SecretString, model: Option<&str>) -> Self {
        Self {
            client: Client::builder()
                .connect_timeout(CONNECT_TIMEOUT)
                .build()
                .expect("failed to build HTTP client"),
            api_key,
            model: model.unwrap_or(DEFAULT_MODEL).to_string(),
            temperature: None,
            max_output_tokens: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }

    fn build_body(&self, prompt: &str) -> GenerateContentRequest {
        let generation_config =
            if self.temperature.is_some() || self.max_output_tokens.is_some() {
                Some(GenerationConfig {
                    temperature: self.temperature,
                    max_output_tokens: self.max_output_tokens,
                })
            } else {
                None
            };

        GenerateContentRequest {
            contents: vec![Content {
                role: "user".into(),
                parts: vec![Part { text: prompt.into() }],
            }],
            generation_config,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{API_BASE}/{model}:generateContent?key={key}",
            model = self.model,
            key = self.api_key.expose_secret(),
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    #[instrument(skip(self, prompt), fields(model = %self.model))]
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let body = self.build_body(prompt);

        let resp = self
            .client
            .post(self.endpoint())
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ProviderError::from_status(status, api_error_message(&body)));
        }

        let parsed: GenerateContentResponse = resp
            .json()
            .await
            .map_err(|e| ProviderError::NetworkError(format!("malformed response: {e}")))?;

        extract_text(parsed).ok_or(ProviderError::EmptyResponse)
    }
}

/// Pull the first candidate's text out of a response.
fn extract_text(response: GenerateContentResponse) -> Option<String> {
    response
        .candidates
        .and_then(|mut candidates| {
            if candidates.is_empty() {
                None
            } else {
                Some(candidates.remove(0))
            }
        })
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .filter(|text| !text.is_empty())
}

/// Prefer the structured `error.message` over the raw body when present.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorWrapper>(body)
        .map(|w| w.error.message)
        .unwrap_or_else(|_| body.to_string())
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}
