//! The executable side of a tool.

use async_trait::async_trait;
use thiserror::Error;

/// An async function the model may request by name.
///
/// Implementations may perform network calls; their failures propagate as
/// the tool stage's failure and are subject to its retry policy. The whole
/// batch of a tool stage is re-executed on retry, so implementations are
/// expected to be idempotent or side-effect-light.
#[async_trait]
pub trait ToolFunction: Send + Sync {
    /// Executes the tool with the model-supplied arguments.
    async fn call(&self, arguments: serde_json::Value) -> Result<String, ToolError>;
}

/// Tool execution errors.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Network failure while the tool talked to an external service.
    #[error("tool transport error: {0}")]
    Transport(String),

    /// The tool ran but could not produce a result.
    #[error("tool failed: {0}")]
    Failed(String),

    /// The model supplied arguments that do not match the tool's schema.
    #[error("invalid tool arguments: {0}")]
    InvalidArguments(String),
}

impl ToolError {
    /// Creates a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates an execution failure.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    /// Creates an invalid-arguments error.
    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::InvalidArguments(message.into())
    }

    /// Returns true if retrying the same call could succeed.
    ///
    /// Re-invoking a tool with the same mismatched arguments cannot, so
    /// `InvalidArguments` is final.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, ToolError::InvalidArguments(_))
    }
}
