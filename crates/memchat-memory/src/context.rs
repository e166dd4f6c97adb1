//! Context construction for the chat completion call.

use crate::state::ChatState;
use memchat_types::Message;

/// Header of the summary system message. The chat system prompt names it,
/// so the two must stay in sync.
pub const MEMORY_SUMMARY_HEADER: &str = "MEMORY SUMMARY:\n";

/// Build the exact send-list for one chat turn:
///
/// 1. the chat system prompt,
/// 2. the summary as a second system message, when non-empty after trim,
/// 3. the window, verbatim and in order.
///
/// No reordering, no deduplication, no role rewriting.
pub fn build_chat_context(system_prompt: &str, state: &ChatState) -> Vec<Message> {
    let mut messages = vec![Message::system(system_prompt)];

    let summary = state.summary();
    if !summary.trim().is_empty() {
        // The summary rides as a system message to make it authoritative.
        messages.push(Message::system(format!("{MEMORY_SUMMARY_HEADER}{summary}")));
    }

    messages.extend_from_slice(state.window());
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use memchat_types::Role;

    #[test]
    fn test_empty_summary_is_omitted() {
        let mut state = ChatState::new();
        state.push_message(Message::user("hi"));
        let context = build_chat_context("prompt", &state);
        assert_eq!(context.len(), 2);
        assert_eq!(context[0], Message::system("prompt"));
        assert_eq!(context[1], Message::user("hi"));
    }

    #[test]
    fn test_whitespace_summary_is_omitted() {
        let mut state = ChatState::new();
        state.replace_summary("  \n ".to_string());
        let context = build_chat_context("prompt", &state);
        assert_eq!(context.len(), 1);
    }

    #[test]
    fn test_summary_rides_as_second_system_message() {
        let mut state = ChatState::new();
        state.replace_summary("S".to_string());
        state.push_message(Message::user("a"));
        state.push_message(Message::assistant("b"));

        let context = build_chat_context("prompt", &state);
        assert_eq!(context.len(), 4);
        assert_eq!(context[1].role, Role::System);
        assert_eq!(context[1].content, "MEMORY SUMMARY:\nS");
        assert_eq!(context[2].content, "a");
        assert_eq!(context[3].content, "b");
    }
}
