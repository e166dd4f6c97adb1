//! Mutable conversation state, owned exclusively by the manager.

use memchat_types::Message;

/// Rolling conversation state: durable summary, verbatim window, turn counter.
///
/// `user_turn_count` counts every user submission ever made through the
/// manager, not the user messages currently in the window.
#[derive(Debug, Clone, Default)]
pub struct ChatState {
    memory_summary: String,
    recent_messages: Vec<Message>,
    user_turn_count: u64,
}

impl ChatState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summary(&self) -> &str {
        &self.memory_summary
    }

    pub fn window(&self) -> &[Message] {
        &self.recent_messages
    }

    pub fn user_turn_count(&self) -> u64 {
        self.user_turn_count
    }

    /// Append a message at the end of the window.
    pub fn push_message(&mut self, message: Message) {
        self.recent_messages.push(message);
    }

    /// Replace the summary in full. Partial edits are not supported.
    pub fn replace_summary(&mut self, summary: String) {
        self.memory_summary = summary;
    }

    /// Replace the window in full (fold truncation).
    pub fn replace_window(&mut self, window: Vec<Message>) {
        self.recent_messages = window;
    }

    /// Count one user submission.
    pub fn record_user_turn(&mut self) {
        self.user_turn_count += 1;
    }
}
