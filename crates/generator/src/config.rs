//! Generator configuration loaded from environment variables.

use std::time::Duration;

/// Connection settings for an OpenAI-compatible endpoint.
///
/// | Env var            | Default                      |
/// |--------------------|------------------------------|
/// | `LLM_API_KEY`      | (none, generation disabled)  |
/// | `LLM_API_URL`      | `https://api.openai.com/v1`  |
/// | `LLM_CHAT_MODEL`   | `gpt-4o`                     |
/// | `LLM_IMAGE_MODEL`  | `dall-e-3`                   |
/// | `LLM_TIMEOUT_SECS` | `60`                         |
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub api_key: String,
    /// Base URL without a trailing slash, e.g. `https://api.openai.com/v1`.
    pub api_url: String,
    pub chat_model: String,
    pub image_model: String,
    pub timeout: Duration,
}

impl GeneratorConfig {
    /// Load from the environment. Returns `None` when `LLM_API_KEY` is
    /// unset or blank.
    ///
    /// # Panics
    ///
    /// Panics if `LLM_TIMEOUT_SECS` is set but is not a valid `u64`.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("LLM_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())?;

        let api_url = std::env::var("LLM_API_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".into())
            .trim_end_matches('/')
            .to_string();
        let chat_model = std::env::var("LLM_CHAT_MODEL").unwrap_or_else(|_| "gpt-4o".into());
        let image_model = std::env::var("LLM_IMAGE_MODEL").unwrap_or_else(|_| "dall-e-3".into());
        let timeout_secs: u64 = std::env::var("LLM_TIMEOUT_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("LLM_TIMEOUT_SECS must be a valid u64");

        Some(Self {
            api_key,
            api_url,
            chat_model,
            image_model,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}
