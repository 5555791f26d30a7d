//! Generator backed by an OpenAI-compatible HTTP API.
//!
//! Uses `POST {api_url}/chat/completions` (JSON mode, image attached as an
//! `image_url` part) for stats and `POST {api_url}/images/generations` for
//! images.

use async_trait::async_trait;
use bitlings_core::generation::{parse_generator_output, Normalized};
use serde::Deserialize;
use serde_json::json;

use crate::config::GeneratorConfig;
use crate::error::GeneratorError;
use crate::prompts;
use crate::{Generator, StatsRequest};

/// HTTP client for one OpenAI-compatible endpoint.
pub struct OpenAiGenerator {
    client: reqwest::Client,
    config: GeneratorConfig,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    url: Option<String>,
}

impl OpenAiGenerator {
    /// Build a client with the configured request timeout.
    pub fn new(config: GeneratorConfig) -> Result<Self, GeneratorError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// Reuse an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: GeneratorConfig) -> Self {
        Self { client, config }
    }

    async fn post<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, GeneratorError> {
        let response = self
            .client
            .post(format!("{}/{path}", self.config.api_url))
            .bearer_auth(&self.config.api_key)
            .json(body)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Return the response unchanged on success, or an
    /// [`GeneratorError::Api`] carrying status and body.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, GeneratorError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GeneratorError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, GeneratorError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

/// Chat completion body for a stats request.
fn stats_body(model: &str, request: &StatsRequest) -> serde_json::Value {
    json!({
        "model": model,
        "messages": [
            { "role": "system", "content": prompts::stats_system_prompt() },
            {
                "role": "user",
                "content": [
                    {
                        "type": "text",
                        "text": prompts::stats_user_prompt(&request.name, &request.description),
                    },
                    { "type": "image_url", "image_url": { "url": request.image_url } },
                ],
            },
        ],
        "response_format": { "type": "json_object" },
    })
}

/// Image generation body for a (not yet enhanced) user prompt.
fn image_body(model: &str, prompt: &str) -> serde_json::Value {
    json!({
        "model": model,
        "prompt": prompts::enhance_image_prompt(prompt),
        "n": 1,
        "size": "1024x1024",
        "quality": "standard",
    })
}

/// The first choice's message text; an absent message reads as `{}`, which
/// the repair step turns into the default bundle.
fn first_content(response: ChatResponse) -> String {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .unwrap_or_else(|| "{}".to_string())
}

fn first_url(response: ImageResponse) -> Result<String, GeneratorError> {
    response
        .data
        .into_iter()
        .find_map(|d| d.url.filter(|u| !u.is_empty()))
        .ok_or(GeneratorError::EmptyResponse("image URL"))
}

#[async_trait]
impl Generator for OpenAiGenerator {
    async fn generate_stats(&self, request: &StatsRequest) -> Result<Normalized, GeneratorError> {
        let body = stats_body(&self.config.chat_model, request);
        let response: ChatResponse = self.post("chat/completions", &body).await?;
        let normalized = parse_generator_output(&first_content(response));

        if normalized.was_repaired() {
            tracing::warn!(
                name = %request.name,
                repairs = ?normalized.repairs,
                "Repaired generator output",
            );
        }
        Ok(normalized)
    }

    async fn generate_image(&self, prompt: &str) -> Result<String, GeneratorError> {
        let body = image_body(&self.config.image_model, prompt);
        let response: ImageResponse = self.post("images/generations", &body).await?;
        let url = first_url(response)?;
        tracing::info!(model = %self.config.image_model, "Generated image");
        Ok(url)
    }
}
