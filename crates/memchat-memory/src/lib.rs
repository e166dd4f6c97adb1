//! MemChat Memory - stateful chat memory for unbounded dialogues
//!
//! Keeps a bounded window of verbatim recent messages plus a durable summary
//! of everything older. Each user turn runs through the same path: evaluate
//! the fold triggers (token, overflow, safety, in that order), fold at most
//! once, append the input, build the exact send-list, call the chat model,
//! append the reply.

pub mod context;
pub mod error;
pub mod fold;
pub mod manager;
pub mod policy;
pub mod prompts;
pub mod state;
pub mod summarize;
pub mod triggers;

pub use context::{build_chat_context, MEMORY_SUMMARY_HEADER};
pub use error::MemoryError;
pub use manager::{MemoryManager, MemoryStats};
pub use policy::MemoryPolicy;
pub use state::ChatState;
pub use summarize::Summarizer;
