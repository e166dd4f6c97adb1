//! Summarization trigger predicates and priority selection.

use crate::context::build_chat_context;
use crate::policy::MemoryPolicy;
use crate::state::ChatState;
use memchat_provider::TokenEstimator;
use memchat_types::{TriggerReason, TriggerResult};
use tracing::warn;

/// Overflow: the window outgrew `max_recent`.
pub fn check_overflow(state: &ChatState, policy: &MemoryPolicy) -> TriggerResult {
    let len = state.window().len();
    if len > policy.max_recent() {
        return TriggerResult::fired(
            TriggerReason::Overflow,
            format!("window length {} exceeds {}", len, policy.max_recent()),
        );
    }
    TriggerResult::none()
}

/// Safety: fires every `safety_user_turns` user submissions, as insurance
/// against short turns that accumulate history without ever overflowing.
pub fn check_safety(state: &ChatState, policy: &MemoryPolicy) -> TriggerResult {
    if policy.safety_user_turns == 0 {
        return TriggerResult::none();
    }
    let turns = state.user_turn_count();
    if turns > 0 && turns % policy.safety_user_turns == 0 {
        return TriggerResult::fired(
            TriggerReason::Safety,
            format!(
                "user turn {} hit the {}-turn safety interval",
                turns, policy.safety_user_turns
            ),
        );
    }
    TriggerResult::none()
}

/// Token budget: the prepared context (system prompt, summary, window)
/// estimates above the configured share of the model context window.
/// Disabled without an estimator; an estimator failure is logged and
/// treated as not-triggered.
pub fn check_token(
    state: &ChatState,
    policy: &MemoryPolicy,
    system_prompt: &str,
    estimator: Option<&dyn TokenEstimator>,
) -> TriggerResult {
    let Some(estimator) = estimator else {
        return TriggerResult::none();
    };

    let context = build_chat_context(system_prompt, state);
    let estimate = match estimator.estimate(&context) {
        Ok(estimate) => estimate,
        Err(err) => {
            warn!(error = %err, "token estimator failed, treating as not triggered");
            return TriggerResult::none();
        }
    };

    let limit = estimator.context_limit();
    let budget = (policy.token_budget_ratio * limit as f32) as usize;
    if estimate > budget {
        return TriggerResult::fired(
            TriggerReason::Token,
            format!(
                "estimated {} tokens exceeds budget {} ({} of {})",
                estimate, budget, policy.token_budget_ratio, limit
            ),
        );
    }
    TriggerResult::none()
}

/// First fired result in priority order: token, overflow, safety.
pub fn choose_trigger(
    token: TriggerResult,
    overflow: TriggerResult,
    safety: TriggerResult,
) -> TriggerResult {
    for result in [token, overflow, safety] {
        if result.triggered {
            return result;
        }
    }
    TriggerResult::none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use memchat_types::Message;

    fn policy(k: usize, b: usize, safety: u64) -> MemoryPolicy {
        MemoryPolicy::new(k, b, 0.7, safety).unwrap()
    }

    fn state_with_window(len: usize) -> ChatState {
        let mut state = ChatState::new();
        for i in 0..len {
            state.push_message(Message::user(format!("m{i}")));
        }
        state
    }

    struct FixedEstimator {
        tokens: usize,
        limit: usize,
    }

    impl TokenEstimator for FixedEstimator {
        fn estimate(&self, _messages: &[Message]) -> anyhow::Result<usize> {
            Ok(self.tokens)
        }

        fn context_limit(&self) -> usize {
            self.limit
        }
    }

    struct FailingEstimator;

    impl TokenEstimator for FailingEstimator {
        fn estimate(&self, _messages: &[Message]) -> anyhow::Result<usize> {
            anyhow::bail!("tokenizer unavailable")
        }

        fn context_limit(&self) -> usize {
            100
        }
    }

    #[test]
    fn test_overflow_fires_only_above_max_recent() {
        let policy = policy(2, 2, 0);
        assert!(!check_overflow(&state_with_window(4), &policy).triggered);
        let fired = check_overflow(&state_with_window(5), &policy);
        assert!(fired.triggered);
        assert_eq!(fired.reason, Some(TriggerReason::Overflow));
        assert!(fired.details.unwrap().contains("5"));
    }

    #[test]
    fn test_safety_disabled_at_zero() {
        let mut state = ChatState::new();
        state.record_user_turn();
        assert!(!check_safety(&state, &policy(2, 2, 0)).triggered);
    }

    #[test]
    fn test_safety_fires_on_multiples() {
        let policy = policy(2, 2, 3);
        let mut state = ChatState::new();
        assert!(!check_safety(&state, &policy).triggered);
        for _ in 0..3 {
            state.record_user_turn();
        }
        assert!(check_safety(&state, &policy).triggered);
        state.record_user_turn();
        assert!(!check_safety(&state, &policy).triggered);
    }

    #[test]
    fn test_token_disabled_without_estimator() {
        assert!(!check_token(&state_with_window(50), &policy(2, 2, 0), "p", None).triggered);
    }

    #[test]
    fn test_token_fires_above_budget() {
        let policy = policy(2, 2, 0);
        let over = FixedEstimator {
            tokens: 71,
            limit: 100,
        };
        let under = FixedEstimator {
            tokens: 70,
            limit: 100,
        };
        let state = state_with_window(1);
        assert!(check_token(&state, &policy, "p", Some(&over)).triggered);
        assert!(!check_token(&state, &policy, "p", Some(&under)).triggered);
    }

    #[test]
    fn test_estimator_failure_is_not_a_trigger() {
        let state = state_with_window(1);
        assert!(!check_token(&state, &policy(2, 2, 0), "p", Some(&FailingEstimator)).triggered);
    }

    #[test]
    fn test_priority_token_overflow_safety() {
        let token = TriggerResult::fired(TriggerReason::Token, "t");
        let overflow = TriggerResult::fired(TriggerReason::Overflow, "o");
        let safety = TriggerResult::fired(TriggerReason::Safety, "s");

        let chosen = choose_trigger(token.clone(), overflow.clone(), safety.clone());
        assert_eq!(chosen.reason, Some(TriggerReason::Token));

        let chosen = choose_trigger(TriggerResult::none(), overflow, safety.clone());
        assert_eq!(chosen.reason, Some(TriggerReason::Overflow));

        let chosen = choose_trigger(TriggerResult::none(), TriggerResult::none(), safety);
        assert_eq!(chosen.reason, Some(TriggerReason::Safety));

        let chosen = choose_trigger(
            TriggerResult::none(),
            TriggerResult::none(),
            TriggerResult::none(),
        );
        assert!(!chosen.triggered);
    }
}
