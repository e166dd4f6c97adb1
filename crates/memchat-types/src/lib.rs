//! MemChat Types - Core types for the memchat crates
//!
//! This module defines the conversational data model shared by the memory
//! engine, the provider layer, and the CLI front end.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Chat role for messages. The set is closed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single conversation message. Immutable once appended to the window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

// ============================================================================
// Trigger Reporting
// ============================================================================

/// Which summarization trigger fired.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TriggerReason {
    Token,
    Overflow,
    Safety,
}

impl TriggerReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerReason::Token => "token",
            TriggerReason::Overflow => "overflow",
            TriggerReason::Safety => "safety",
        }
    }
}

impl fmt::Display for TriggerReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one trigger evaluation pass.
///
/// `reason` and `details` are present only when `triggered` is true. A fold
/// that fired but whose summarizer call failed keeps `triggered = true` and
/// carries the error in `details`; the conversation state is untouched then.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriggerResult {
    pub triggered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<TriggerReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl TriggerResult {
    /// No trigger fired.
    pub fn none() -> Self {
        Self::default()
    }

    /// A trigger fired for `reason`.
    pub fn fired(reason: TriggerReason, details: impl Into<String>) -> Self {
        Self {
            triggered: true,
            reason: Some(reason),
            details: Some(details.into()),
        }
    }

    /// Record a summarization failure on an already-fired result.
    pub fn with_failure(mut self, error: impl fmt::Display) -> Self {
        let failure = format!("summarization failed: {error}");
        self.details = Some(match self.details.take() {
            Some(details) => format!("{details}; {failure}"),
            None => failure,
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&Message::user("hi")).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"hi"}"#);
    }

    #[test]
    fn test_trigger_result_none_has_no_reason() {
        let result = TriggerResult::none();
        assert!(!result.triggered);
        assert!(result.reason.is_none());
        assert!(result.details.is_none());
    }

    #[test]
    fn test_with_failure_appends_to_details() {
        let result = TriggerResult::fired(TriggerReason::Overflow, "window length 6 exceeds 4")
            .with_failure("connection reset");
        assert!(result.triggered);
        assert_eq!(result.reason, Some(TriggerReason::Overflow));
        let details = result.details.unwrap();
        assert!(details.contains("window length 6 exceeds 4"));
        assert!(details.contains("summarization failed: connection reset"));
    }
}
