//! Gemini `generateContent` client.

use super::{LlmResponse, TextGenerator};
use crate::errors::ProviderError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

/// Default model used by the outline pipeline.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Default REST endpoint root.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Connection settings for [`GeminiGenerator`].
#[derive(Debug, Clone, PartialEq)]
pub struct GeminiConfig {
    /// API key; `None` makes every call fail with `MissingApiKey`.
    pub api_key: Option<String>,
    /// Model name, with or without a `gemini/` prefix.
    pub model: String,
    /// Endpoint root.
    pub base_url: String,
    /// Sampling temperature; provider default when unset.
    pub temperature: Option<f32>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            temperature: None,
        }
    }
}

impl GeminiConfig {
    /// Sets the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the endpoint root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Returns the model name without a routing prefix.
    #[must_use]
    pub fn model_name(&self) -> &str {
        self.model.strip_prefix("gemini/").unwrap_or(&self.model)
    }

    /// Returns the full `generateContent` URL.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model_name()
        )
    }
}

/// Generator backed by the Gemini REST API.
#[derive(Debug, Clone)]
pub struct GeminiGenerator {
    client: Client,
    config: GeminiConfig,
}

impl GeminiGenerator {
    /// Creates a new Gemini generator.
    #[must_use]
    pub fn new(config: GeminiConfig) -> Self {
        debug!(model = config.model_name(), url = %config.endpoint(), "Created Gemini generator");
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    fn name(&self) -> &str {
        "gemini"
    }

    #[instrument(skip(self, prompt, context), fields(model = self.config.model_name()))]
    async fn generate(&self, prompt: &str, context: &str) -> Result<LlmResponse, ProviderError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingApiKey)?;

        let request = build_request(prompt, context, self.config.temperature);

        debug!(
            prompt_chars = prompt.len(),
            context_chars = context.len(),
            "Sending request"
        );

        let response = self
            .client
            .post(self.config.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "HTTP request failed");
                ProviderError::Http(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = api_error_message(status, response.text().await.ok());
            error!(status = %status, error = %message, "API error");
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateContentResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse response");
            ProviderError::ResponseParsing(e.to_string())
        })?;

        parse_response(body, self.config.model_name(), self.name())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: Option<u32>,
    #[serde(default)]
    candidates_token_count: Option<u32>,
}

/// Builds the request body. Prior-stage context goes first as its own part.
pub(crate) fn build_request(
    prompt: &str,
    context: &str,
    temperature: Option<f32>,
) -> GenerateContentRequest {
    let mut parts = Vec::with_capacity(2);
    if !context.is_empty() {
        parts.push(Part {
            text: Some(format!("Context from earlier stages:\n\n{context}")),
        });
    }
    parts.push(Part {
        text: Some(prompt.to_string()),
    });

    GenerateContentRequest {
        contents: vec![Content {
            role: Some("user".to_string()),
            parts,
        }],
        generation_config: temperature.map(|temperature| GenerationConfig { temperature }),
    }
}

/// Uses the response body as the error message, or the status reason phrase
/// when the body is empty or could not be read.
pub(crate) fn api_error_message(status: StatusCode, body: Option<String>) -> String {
    match body {
        Some(body) if !body.trim().is_empty() => body,
        _ => status
            .canonical_reason()
            .unwrap_or("unknown status")
            .to_string(),
    }
}

/// Extracts the first candidate's text.
pub(crate) fn parse_response(
    body: GenerateContentResponse,
    model: &str,
    provider: &str,
) -> Result<LlmResponse, ProviderError> {
    let candidate = body
        .candidates
        .into_iter()
        .next()
        .ok_or(ProviderError::EmptyResponse)?;

    let text = candidate
        .content
        .map(|c| {
            c.parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    if text.is_empty() {
        return Err(ProviderError::EmptyResponse);
    }

    let mut response = LlmResponse::new(text, model, provider);
    response.finish_reason = candidate.finish_reason;
    if let Some(usage) = body.usage_metadata {
        response.input_tokens = usage.prompt_token_count;
        response.output_tokens = usage.candidates_token_count;
    }
    Ok(response)
}
