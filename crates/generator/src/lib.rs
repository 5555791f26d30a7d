//! Stats generation adapter.
//!
//! Wraps an external multimodal model behind the [`Generator`] trait. The
//! production implementation, [`OpenAiGenerator`], talks to any
//! OpenAI-compatible endpoint; raw model output is always passed through
//! [`bitlings_core::generation::parse_generator_output`] before it leaves
//! this crate.

pub mod config;
pub mod error;
pub mod openai;
pub mod prompts;

use async_trait::async_trait;
use bitlings_core::error::CoreError;
use bitlings_core::generation::Normalized;

pub use config::GeneratorConfig;
pub use error::GeneratorError;
pub use openai::OpenAiGenerator;

/// Input for a stats generation call.
#[derive(Debug, Clone)]
pub struct StatsRequest {
    pub name: String,
    pub description: String,
    pub image_url: String,
}

impl StatsRequest {
    /// All three fields are required and must be non-blank.
    pub fn validate(&self) -> Result<(), CoreError> {
        let missing: Vec<&str> = [
            ("name", &self.name),
            ("description", &self.description),
            ("imageUrl", &self.image_url),
        ]
        .into_iter()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(k, _)| k)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )))
        }
    }
}

/// An external generative capability.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Produce a repaired stats bundle for a creature.
    ///
    /// Transport failures and non-success responses are errors; malformed
    /// but readable output is repaired, never rejected.
    async fn generate_stats(&self, request: &StatsRequest) -> Result<Normalized, GeneratorError>;

    /// Produce an image for `prompt` and return its URL.
    async fn generate_image(&self, prompt: &str) -> Result<String, GeneratorError>;
}

/// Stand-in used when no credentials are configured. Every call fails with
/// [`GeneratorError::Disabled`].
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledGenerator;

#[async_trait]
impl Generator for DisabledGenerator {
    async fn generate_stats(&self, _request: &StatsRequest) -> Result<Normalized, GeneratorError> {
        Err(GeneratorError::Disabled)
    }

    async fn generate_image(&self, _prompt: &str) -> Result<String, GeneratorError> {
        Err(GeneratorError::Disabled)
    }
}
