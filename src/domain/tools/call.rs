//! Tool call - the model's request to invoke a tool.

use serde::{Deserialize, Serialize};

/// A request to invoke a tool, as produced by the model.
///
/// Arguments are carried as JSON to support the varying schemas of
/// different tools.
///
/// # Examples
///
/// ```
/// use gaia_agent::domain::tools::ToolCall;
///
/// let call = ToolCall::new(
///     "google_search",
///     serde_json::json!({ "question": "capital of France" }),
/// );
/// assert_eq!(call.name(), "google_search");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Name of the tool to invoke
    name: String,

    /// Arguments for the tool (JSON object)
    arguments: serde_json::Value,
}

impl ToolCall {
    /// Creates a new tool call.
    pub fn new(name: impl Into<String>, arguments: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    /// Returns the tool name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the arguments.
    pub fn arguments(&self) -> &serde_json::Value {
        &self.arguments
    }

    /// Consumes self and returns the arguments.
    pub fn into_arguments(self) -> serde_json::Value {
        self.arguments
    }
}
