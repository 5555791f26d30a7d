use bitlings_core::error::CoreError;

/// Errors from the generation transport.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The model API returned a non-2xx status code.
    #[error("Generator API error ({status}): {body}")]
    Api {
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A success response carried nothing usable.
    #[error("Generator returned no {0}")]
    EmptyResponse(&'static str),

    #[error("Generation is not configured (LLM_API_KEY is unset)")]
    Disabled,
}

impl From<GeneratorError> for CoreError {
    fn from(err: GeneratorError) -> Self {
        CoreError::ExternalService(err.to_string())
    }
}
