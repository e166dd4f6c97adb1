//! Error types for provider operations

use thiserror::Error;

/// Errors from the LLM provider layer
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Request construction or transport failure from the OpenAI SDK
    #[error("completion request failed: {0}")]
    Api(#[from] async_openai::error::OpenAIError),

    /// Provider answered with an empty choice list
    #[error("no choices returned from API")]
    EmptyResponse,

    /// The configured deadline elapsed before the provider answered
    #[error("completion timed out after {0:?}")]
    Timeout(std::time::Duration),
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, ProviderError>;
