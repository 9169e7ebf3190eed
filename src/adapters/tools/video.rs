//! Video Q&A tool.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::adapters::gemini::GeminiClient;
use crate::domain::tools::{ToolDefinition, ToolError, ToolFunction};

use super::required_str;

const YOUTUBE_PREFIX: &str = "https://www.youtube.com/watch?v=";

/// Answers a question from the content of a YouTube video.
pub struct YoutubeSearch {
    gemini: Arc<GeminiClient>,
}

impl YoutubeSearch {
    /// Creates the tool over a shared Gemini client.
    pub fn new(gemini: Arc<GeminiClient>) -> Self {
        Self { gemini }
    }

    /// Model-facing definition.
    pub fn definition() -> ToolDefinition {
        ToolDefinition::new(
            "youtube_search",
            "Answer a question based on the content of a YouTube video. The \
             URL must be of the form https://www.youtube.com/watch?v=VIDEO_ID.",
            serde_json::json!({
                "type": "object",
                "required": ["question", "video_url"],
                "properties": {
                    "question": {
                        "type": "string",
                        "description": "The question to answer."
                    },
                    "video_url": {
                        "type": "string",
                        "description": "The URL of the YouTube video."
                    }
                }
            }),
        )
    }
}

#[async_trait]
impl ToolFunction for YoutubeSearch {
    async fn call(&self, arguments: serde_json::Value) -> Result<String, ToolError> {
        let question = required_str(&arguments, "question")?;
        let video_url = required_str(&arguments, "video_url")?;

        if !video_url.starts_with(YOUTUBE_PREFIX) {
            return Err(ToolError::invalid_arguments(format!(
                "invalid YouTube URL: {}",
                video_url
            )));
        }

        info!(video_url = %video_url, "answering from video");
        let prompt = format!(
            "Based on the content of this YouTube video, answer the following \
             question:\n\n{}",
            question
        );

        self.gemini
            .generate_with_video(&prompt, &video_url)
            .await
            .map_err(|e| ToolError::transport(e.to_string()))
    }
}
