//! Generative language API adapter.
//!
//! Implements the [`ModelClient`](crate::ports::ModelClient) port over the
//! Gemini REST API: inference with function calling, file ingestion, plus
//! concrete helpers for search-grounded and video-grounded generation used
//! by the builtin tools.

mod client;
mod wire;

pub use client::{GeminiClient, GeminiConfig};
