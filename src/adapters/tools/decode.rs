//! Text decoding tool.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::adapters::gemini::GeminiClient;
use crate::domain::tools::{ToolDefinition, ToolError, ToolFunction};

use super::required_str;

/// Decodes obfuscated or transformed text through a model call.
pub struct DecodeText {
    gemini: Arc<GeminiClient>,
}

impl DecodeText {
    /// Creates the tool over a shared Gemini client.
    pub fn new(gemini: Arc<GeminiClient>) -> Self {
        Self { gemini }
    }

    /// Model-facing definition.
    pub fn definition() -> ToolDefinition {
        ToolDefinition::new(
            "decode_text",
            "Decode the given text and return the decoded text. Use this tool \
             whenever you encounter text that is not in a standard readable \
             format, such as reversed text or text encoded with a specific \
             algorithm.",
            serde_json::json!({
                "type": "object",
                "required": ["text"],
                "properties": {
                    "text": {
                        "type": "string",
                        "description": "The text to decode."
                    }
                }
            }),
        )
    }
}

#[async_trait]
impl ToolFunction for DecodeText {
    async fn call(&self, arguments: serde_json::Value) -> Result<String, ToolError> {
        let text = required_str(&arguments, "text")?;
        info!("decoding text");

        let prompt = format!(
            "Decode the following text, ONLY respond with the decoded text:\n\n{}",
            text
        );

        self.gemini
            .generate_text(&prompt)
            .await
            .map_err(|e| ToolError::transport(e.to_string()))
    }
}
