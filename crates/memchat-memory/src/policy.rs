//! Sizing and trigger policy for the conversation memory.

use crate::error::MemoryError;
use serde::{Deserialize, Serialize};

/// Immutable memory policy.
///
/// `k_verbatim` newest messages survive every fold; `b_buffer` is the slack
/// on top of that before the overflow trigger fires.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MemoryPolicy {
    /// Newest messages always kept verbatim after a fold.
    pub k_verbatim: usize,
    /// Slack above `k_verbatim` before overflow fires.
    pub b_buffer: usize,
    /// Share of the model context window the token trigger tolerates.
    pub token_budget_ratio: f32,
    /// Fire an insurance fold every N user turns. Zero disables it.
    pub safety_user_turns: u64,
}

impl Default for MemoryPolicy {
    fn default() -> Self {
        Self {
            k_verbatim: 6,
            b_buffer: 4,
            token_budget_ratio: 0.70,
            safety_user_turns: 10,
        }
    }
}

impl MemoryPolicy {
    /// Build a validated policy.
    pub fn new(
        k_verbatim: usize,
        b_buffer: usize,
        token_budget_ratio: f32,
        safety_user_turns: u64,
    ) -> Result<Self, MemoryError> {
        let policy = Self {
            k_verbatim,
            b_buffer,
            token_budget_ratio,
            safety_user_turns,
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Check the construction invariants. Deserialized policies go through
    /// this before they reach a manager.
    pub fn validate(&self) -> Result<(), MemoryError> {
        if self.k_verbatim == 0 {
            return Err(MemoryError::InvalidPolicy(
                "k_verbatim must be at least 1".to_string(),
            ));
        }
        if !(self.token_budget_ratio > 0.0 && self.token_budget_ratio <= 1.0) {
            return Err(MemoryError::InvalidPolicy(format!(
                "token_budget_ratio must be in (0, 1], got {}",
                self.token_budget_ratio
            )));
        }
        Ok(())
    }

    /// Window capacity before the overflow trigger fires.
    pub fn max_recent(&self) -> usize {
        self.k_verbatim + self.b_buffer
    }
}
