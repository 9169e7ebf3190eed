//! Model Client Port - interface for language-model inference and file ingestion.
//!
//! Abstracts the generative-language provider so the workflow engine can run
//! against the real API or scripted mocks.
//!
//! # Design
//!
//! - One request type carrying the full turn history, advertised tool
//!   schemas, optional system instruction, and sampling temperature
//! - A reply is either final text or a batch of requested tool calls,
//!   never both
//! - Error kinds carry a retryability classification consumed by the
//!   engine's retry policy

use async_trait::async_trait;
use std::path::Path;

use crate::domain::conversation::{FileReference, Turn};
use crate::domain::tools::{ToolCall, ToolDefinition};

/// Port for language-model interactions.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Runs one inference over the supplied conversation.
    async fn generate(&self, request: GenerateRequest) -> Result<ModelReply, ModelError>;

    /// Ingests a local file into the provider's file store.
    ///
    /// The returned handle is replayed as a conversation turn in later
    /// `generate` calls.
    async fn upload_file(&self, path: &Path) -> Result<FileReference, ModelError>;
}

/// Request for one model inference.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Conversation history in append order.
    pub turns: Vec<Turn>,
    /// Tool schemas advertised to the model. Empty disables tool calling.
    pub tools: Vec<ToolDefinition>,
    /// Optional system instruction.
    pub system_instruction: Option<String>,
    /// Sampling temperature. The workflow pins this to 0.0.
    pub temperature: f32,
}

impl GenerateRequest {
    /// Creates a request over the given turns with deterministic sampling.
    pub fn new(turns: Vec<Turn>) -> Self {
        Self {
            turns,
            tools: Vec::new(),
            system_instruction: None,
            temperature: 0.0,
        }
    }

    /// Advertises tool schemas to the model.
    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = tools;
        self
    }

    /// Sets the system instruction.
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// A successful model reply.
///
/// Exactly one variant is produced per call: either final text or one or
/// more requested tool calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelReply {
    /// Plain text response.
    Text(String),

    /// The model asks the engine to execute these tools, in order.
    ToolCalls(Vec<ToolCall>),
}

impl ModelReply {
    /// Returns the text if this is a text reply.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ModelReply::Text(text) => Some(text),
            ModelReply::ToolCalls(_) => None,
        }
    }

    /// Returns true if the model requested tool execution.
    pub fn requests_tools(&self) -> bool {
        matches!(self, ModelReply::ToolCalls(_))
    }
}

/// Model provider errors.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Rate limited by the provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// Provider is unavailable.
    #[error("provider unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },

    /// The provider returned neither text nor tool calls.
    #[error("empty model response")]
    EmptyResponse,

    /// Failed to parse the provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Invalid request configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ModelError {
    /// Creates a rate limited error.
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Returns true if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ModelError::RateLimited { .. }
                | ModelError::Unavailable { .. }
                | ModelError::Network(_)
                | ModelError::Timeout { .. }
                | ModelError::EmptyResponse
                | ModelError::Parse(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::Turn;

    #[test]
    fn request_builder_works() {
        let request = GenerateRequest::new(vec![Turn::user("What is 2+2?")])
            .with_system_instruction("Answer tersely")
            .with_temperature(0.0);

        assert_eq!(request.turns.len(), 1);
        assert_eq!(request.system_instruction.as_deref(), Some("Answer tersely"));
        assert_eq!(request.temperature, 0.0);
        assert!(request.tools.is_empty());
    }

    #[test]
    fn reply_text_accessor() {
        let reply = ModelReply::Text("FINAL ANSWER: 4".to_string());
        assert_eq!(reply.as_text(), Some("FINAL ANSWER: 4"));
        assert!(!reply.requests_tools());
    }

    #[test]
    fn reply_tool_calls_accessor() {
        let reply = ModelReply::ToolCalls(vec![ToolCall::new(
            "google_search",
            serde_json::json!({ "question": "capital of France" }),
        )]);
        assert!(reply.requests_tools());
        assert_eq!(reply.as_text(), None);
    }

    #[test]
    fn retryable_classification() {
        assert!(ModelError::rate_limited(30).is_retryable());
        assert!(ModelError::unavailable("down").is_retryable());
        assert!(ModelError::network("timeout").is_retryable());
        assert!(ModelError::Timeout { timeout_secs: 30 }.is_retryable());
        assert!(ModelError::EmptyResponse.is_retryable());
        assert!(ModelError::parse("truncated").is_retryable());

        assert!(!ModelError::AuthenticationFailed.is_retryable());
        assert!(!ModelError::InvalidRequest("bad schema".to_string()).is_retryable());
    }
}
