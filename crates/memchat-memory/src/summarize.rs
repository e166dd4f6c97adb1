//! Summarizer client: rewrites the memory summary through an LLM.

use memchat_provider::{ChatCompletion, ProviderError};
use memchat_types::Message;
use std::sync::Arc;
use tracing::debug;

/// Sampling temperature for summary rewrites.
const SUMMARIZER_TEMPERATURE: f32 = 0.2;

/// Wraps a completion capability with the fixed summarizer prompt.
///
/// Stateless: each call hands the model the existing summary plus the
/// messages to fold and expects the full replacement summary back.
pub struct Summarizer {
    client: Arc<dyn ChatCompletion>,
    system_prompt: String,
}

impl Summarizer {
    pub fn new(client: Arc<dyn ChatCompletion>, system_prompt: impl Into<String>) -> Self {
        Self {
            client,
            system_prompt: system_prompt.into(),
        }
    }

    /// Produce the updated summary for `current` plus `to_fold`.
    ///
    /// Plain text in, plain text out. No JSON framing.
    pub async fn summarize(
        &self,
        current: &str,
        to_fold: &[Message],
    ) -> Result<String, ProviderError> {
        let request = vec![
            Message::system(self.system_prompt.clone()),
            Message::user(format!(
                "EXISTING MEMORY SUMMARY (may be empty):\n{}\n\n\
                 MESSAGES TO FOLD INTO MEMORY:\n{}\n\n\
                 Produce the updated memory summary only.",
                current.trim(),
                format_for_summarizer(to_fold),
            )),
        ];

        debug!(folded = to_fold.len(), "requesting summary rewrite");
        let summary = self.client.complete(&request, SUMMARIZER_TEMPERATURE).await?;
        Ok(summary.trim().to_string())
    }
}

/// One line per message. Input formatting for the summarizer only; this is
/// not a transcript the chat model ever sees.
pub fn format_for_summarizer(messages: &[Message]) -> String {
    messages
        .iter()
        .map(|m| format!("- {}: {}", m.role.as_str().to_uppercase(), m.content))
        .collect::<Vec<_>>()
        .join("\n")
}
