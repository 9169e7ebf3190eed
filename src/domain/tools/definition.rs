//! Tool definition - schema and metadata for a tool.
//!
//! Defines the model-facing interface of a tool: its name, a description the
//! model reads as documentation, and a JSON Schema for its arguments.

use serde::{Deserialize, Serialize};

/// Definition of a tool that can be requested by the model.
///
/// # Examples
///
/// ```
/// use gaia_agent::domain::tools::ToolDefinition;
///
/// let definition = ToolDefinition::new(
///     "wikipedia_search",
///     "Search Wikipedia for a title and return the top result's content",
///     serde_json::json!({
///         "type": "object",
///         "required": ["wikipedia_title"],
///         "properties": {
///             "wikipedia_title": { "type": "string" }
///         }
///     }),
/// );
/// assert_eq!(definition.name(), "wikipedia_search");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique name of the tool (e.g., "wikipedia_search")
    name: String,

    /// Human-readable description shown to the model
    description: String,

    /// JSON Schema for the arguments
    parameters_schema: serde_json::Value,
}

impl ToolDefinition {
    /// Creates a new tool definition.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters_schema: serde_json::Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters_schema,
        }
    }

    /// Returns the tool name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the parameters schema.
    pub fn parameters_schema(&self) -> &serde_json::Value {
        &self.parameters_schema
    }

    /// Converts to the generative language API's function declaration format.
    pub fn to_function_declaration(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name,
            "description": self.description,
            "parameters": self.parameters_schema
        })
    }
}
