//! The fold engine: moves the oldest window messages into the summary.

use crate::error::MemoryError;
use crate::policy::MemoryPolicy;
use crate::state::ChatState;
use crate::summarize::Summarizer;
use crate::triggers::{check_overflow, check_safety, check_token, choose_trigger};
use memchat_provider::TokenEstimator;
use memchat_types::{Message, TriggerResult};
use tracing::{debug, info, warn};

/// Evaluate the triggers and apply at most one fold.
///
/// Whatever the reason, a fold keeps the newest `k_verbatim` messages and
/// summarizes everything older. For overflow that is exactly the overflow
/// prefix (`len - max_recent` oldest) plus the buffer segment that the
/// truncation to `k_verbatim` would otherwise drop; for safety and token it
/// is the whole tail, which may be empty. An empty tail is reported as fired
/// without a summarizer call.
///
/// On summarizer failure the state is untouched and the error rides in the
/// returned `details`. `Err` is reserved for post-fold invariant violations,
/// after which the state must be considered corrupt.
pub async fn apply_summarization_if_needed(
    state: &mut ChatState,
    policy: &MemoryPolicy,
    summarizer: &Summarizer,
    chat_system_prompt: &str,
    estimator: Option<&dyn TokenEstimator>,
) -> Result<TriggerResult, MemoryError> {
    let token = check_token(state, policy, chat_system_prompt, estimator);
    let overflow = check_overflow(state, policy);
    let safety = check_safety(state, policy);

    let chosen = choose_trigger(token, overflow, safety);
    if !chosen.triggered {
        return Ok(chosen);
    }

    let (to_fold, kept) = split_for_fold(state.window(), policy.k_verbatim);
    if to_fold.is_empty() {
        // Window already at or below the verbatim floor. Folding cannot
        // shrink it further, so record the firing and stop.
        debug!(reason = ?chosen.reason, "trigger fired with nothing to fold");
        return Ok(chosen);
    }

    let before_len = state.window().len();
    match summarizer.summarize(state.summary(), &to_fold).await {
        Ok(updated) => {
            info!(
                reason = ?chosen.reason,
                folded = to_fold.len(),
                kept = kept.len(),
                summary_chars = updated.len(),
                "memory summary rewritten"
            );
            state.replace_summary(updated);
            state.replace_window(kept);
            verify_fold(before_len, to_fold.len(), state.window().len(), policy)?;
            Ok(chosen)
        }
        Err(err) => {
            warn!(reason = ?chosen.reason, error = %err, "summarization failed, state unchanged");
            Ok(chosen.with_failure(err))
        }
    }
}

/// Split the window into (oldest messages to fold, newest `keep` to retain).
fn split_for_fold(window: &[Message], keep: usize) -> (Vec<Message>, Vec<Message>) {
    if window.len() <= keep {
        return (Vec::new(), window.to_vec());
    }
    let split = window.len() - keep;
    (window[..split].to_vec(), window[split..].to_vec())
}

/// Post-fold checks: every pre-fold message is either kept or folded, and
/// the window is down to the verbatim floor.
fn verify_fold(
    before: usize,
    folded: usize,
    after: usize,
    policy: &MemoryPolicy,
) -> Result<(), MemoryError> {
    if folded + after != before {
        return Err(MemoryError::InvariantViolation(format!(
            "{folded} folded + {after} kept does not match {before} pre-fold messages"
        )));
    }
    if after > policy.k_verbatim {
        return Err(MemoryError::InvariantViolation(format!(
            "window holds {} messages after fold, cap is {}",
            after, policy.k_verbatim
        )));
    }
    Ok(())
}
