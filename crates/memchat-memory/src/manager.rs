//! The turn coordinator: owns the conversation state and drives each turn.

use crate::context::build_chat_context;
use crate::error::MemoryError;
use crate::fold::apply_summarization_if_needed;
use crate::policy::MemoryPolicy;
use crate::state::ChatState;
use crate::summarize::Summarizer;
use memchat_provider::{ChatCompletion, TokenEstimator};
use memchat_types::{Message, TriggerResult};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Sampling temperature for the chat model.
const CHAT_TEMPERATURE: f32 = 0.7;

/// Stateful chat manager for a single conversation.
///
/// The manager owns the state exclusively and never hands out window
/// aliases; `submit_user` takes `&mut self`, so turns within a session are
/// serialized by the borrow checker. Multi-session callers instantiate one
/// manager per session and provide their own mutual exclusion around it.
pub struct MemoryManager {
    policy: MemoryPolicy,
    state: ChatState,
    chat_prompt: String,
    chat: Arc<dyn ChatCompletion>,
    summarizer: Summarizer,
    estimator: Option<Arc<dyn TokenEstimator>>,
}

impl MemoryManager {
    /// Create a manager with every collaborator injected. The chat and
    /// summarizer clients may be the same object. Refuses invalid policies.
    pub fn new(
        policy: MemoryPolicy,
        chat_prompt: impl Into<String>,
        summarizer_prompt: impl Into<String>,
        chat: Arc<dyn ChatCompletion>,
        summarizer: Arc<dyn ChatCompletion>,
        estimator: Option<Arc<dyn TokenEstimator>>,
    ) -> Result<Self, MemoryError> {
        policy.validate()?;
        Ok(Self {
            policy,
            state: ChatState::new(),
            chat_prompt: chat_prompt.into(),
            chat,
            summarizer: Summarizer::new(summarizer, summarizer_prompt),
            estimator,
        })
    }

    /// Run one conversation turn: count it, fold if a trigger fires, append
    /// the input, call the chat model, append the reply.
    ///
    /// The fold runs before the input is appended, so the current question
    /// is never folded in its own turn and always stays verbatim.
    pub async fn submit_user(
        &mut self,
        input: &str,
    ) -> Result<(String, TriggerResult), MemoryError> {
        self.state.record_user_turn();

        let fold_result = apply_summarization_if_needed(
            &mut self.state,
            &self.policy,
            &self.summarizer,
            &self.chat_prompt,
            self.estimator.as_deref(),
        )
        .await?;

        self.state.push_message(Message::user(input));

        let context = build_chat_context(&self.chat_prompt, &self.state);
        debug!(
            turn = self.state.user_turn_count(),
            context_len = context.len(),
            "dispatching chat turn"
        );
        let reply = self
            .chat
            .complete(&context, CHAT_TEMPERATURE)
            .await
            .map_err(MemoryError::Chat)?;

        self.state.push_message(Message::assistant(reply.clone()));
        Ok((reply, fold_result))
    }

    /// Current summary, for display.
    pub fn snapshot_summary(&self) -> String {
        self.state.summary().to_string()
    }

    /// Read-only copy of the window.
    pub fn snapshot_window(&self) -> Vec<Message> {
        self.state.window().to_vec()
    }

    pub fn policy(&self) -> &MemoryPolicy {
        &self.policy
    }

    /// Point-in-time sizing counters.
    pub fn stats(&self) -> MemoryStats {
        let estimated_tokens = self.estimator.as_deref().and_then(|estimator| {
            let context = build_chat_context(&self.chat_prompt, &self.state);
            estimator.estimate(&context).ok()
        });

        MemoryStats {
            user_turns: self.state.user_turn_count(),
            window_len: self.state.window().len(),
            max_recent: self.policy.max_recent(),
            summary_chars: self.state.summary().len(),
            estimated_tokens,
        }
    }
}

/// Conversation sizing counters, for display and logging.
#[derive(Debug, Clone, Serialize)]
pub struct MemoryStats {
    pub user_turns: u64,
    pub window_len: usize,
    pub max_recent: usize,
    pub summary_chars: usize,
    pub estimated_tokens: Option<usize>,
}

impl fmt::Display for MemoryStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "memory: {} user turns, window {}/{}, summary {} chars",
            self.user_turns, self.window_len, self.max_recent, self.summary_chars
        )?;
        if let Some(tokens) = self.estimated_tokens {
            write!(f, ", ~{} tokens", tokens)?;
        }
        Ok(())
    }
}
