//! Error types for the memory core

use memchat_provider::ProviderError;
use thiserror::Error;

/// Errors surfaced by the memory manager
#[derive(Debug, Error)]
pub enum MemoryError {
    /// Policy rejected at construction
    #[error("invalid memory policy: {0}")]
    InvalidPolicy(String),

    /// Chat completion failed. The user message of the turn has already been
    /// appended; the caller decides between retrying and truncating.
    #[error("chat completion failed: {0}")]
    Chat(#[source] ProviderError),

    /// A post-fold invariant failed. The conversation state is corrupt and
    /// the manager must be discarded.
    #[error("fold invariant violated: {0}")]
    InvariantViolation(String),
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, MemoryError>;
