//! Token estimation for the token-budget trigger.
//!
//! Exact tokenizer counts are out of scope; the trigger only needs a
//! monotone approximation, and the estimator stays pluggable.

use memchat_types::Message;

/// Default context window size (in tokens, approximate)
pub const DEFAULT_CONTEXT_LIMIT: usize = 128_000;

/// Capability to estimate the token footprint of a prepared context.
pub trait TokenEstimator: Send + Sync {
    /// Estimated token count for the given messages.
    fn estimate(&self, messages: &[Message]) -> anyhow::Result<usize>;

    /// Size of the model context window the estimate is measured against.
    fn context_limit(&self) -> usize;
}

/// Character-based estimator: roughly 1 token per 4 characters.
#[derive(Debug, Clone)]
pub struct HeuristicEstimator {
    context_limit: usize,
}

impl HeuristicEstimator {
    pub fn new() -> Self {
        Self {
            context_limit: DEFAULT_CONTEXT_LIMIT,
        }
    }

    pub fn with_context_limit(mut self, limit: usize) -> Self {
        self.context_limit = limit;
        self
    }
}

impl Default for HeuristicEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenEstimator for HeuristicEstimator {
    fn estimate(&self, messages: &[Message]) -> anyhow::Result<usize> {
        let chars: usize = messages
            .iter()
            .map(|m| m.role.as_str().len() + m.content.len())
            .sum();
        Ok((chars / 4).max(1))
    }

    fn context_limit(&self) -> usize {
        self.context_limit
    }
}
