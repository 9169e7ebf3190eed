//! Web search tool.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::adapters::gemini::GeminiClient;
use crate::domain::tools::{ToolDefinition, ToolError, ToolFunction};

use super::required_str;

/// Answers a question from the web via search-grounded generation.
pub struct GoogleSearch {
    gemini: Arc<GeminiClient>,
}

impl GoogleSearch {
    /// Creates the tool over a shared Gemini client.
    pub fn new(gemini: Arc<GeminiClient>) -> Self {
        Self { gemini }
    }

    /// Model-facing definition.
    pub fn definition() -> ToolDefinition {
        ToolDefinition::new(
            "google_search",
            "Search Google for a given question and return a concise answer \
             based on the top search results. Use this tool when you need \
             up-to-date or general information from the web, such as news, \
             facts, or broad topics.",
            serde_json::json!({
                "type": "object",
                "required": ["question"],
                "properties": {
                    "question": {
                        "type": "string",
                        "description": "The question you want answered."
                    }
                }
            }),
        )
    }
}

#[async_trait]
impl ToolFunction for GoogleSearch {
    async fn call(&self, arguments: serde_json::Value) -> Result<String, ToolError> {
        let question = required_str(&arguments, "question")?;
        info!(question = %question, "searching the web");

        self.gemini
            .generate_with_search(&question)
            .await
            .map_err(|e| ToolError::transport(e.to_string()))
    }
}
