//! Conversation domain module.
//!
//! Holds the per-run context shared by every stage of a workflow run: the
//! active question and the ordered, append-only log of conversation turns.

mod context;
mod turn;

pub use context::RunContext;
pub use turn::{FileReference, Turn};
