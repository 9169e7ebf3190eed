//! Gemini client - implementation of ModelClient for the generative
//! language REST API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GeminiConfig::new(api_key)
//!     .with_model("gemini-2.0-flash")
//!     .with_base_url("https://generativelanguage.googleapis.com");
//!
//! let client = GeminiClient::new(config);
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::domain::conversation::FileReference;
use crate::domain::tools::ToolCall;
use crate::ports::{GenerateRequest, ModelClient, ModelError, ModelReply};

use super::wire::{
    extract_text, extract_tool_calls, turn_to_content, Content, FileUploadResponse,
    GenerateContentRequest, GenerateContentResponse, GenerationConfig, GoogleSearch, Part,
    ToolSpec,
};

/// Configuration for the Gemini client.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use (e.g., "gemini-2.0-flash").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gemini-2.0-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout: Duration::from_secs(120),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Gemini REST API client.
pub struct GeminiClient {
    config: GeminiConfig,
    client: Client,
}

impl GeminiClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: GeminiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Builds the generateContent endpoint URL.
    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }

    /// Builds the file upload endpoint URL.
    fn upload_url(&self) -> String {
        format!("{}/upload/v1beta/files", self.config.base_url)
    }

    /// Sends one generateContent request and decodes the first candidate.
    async fn send_generate(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<Content, ModelError> {
        let response = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", self.config.api_key())
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let response = self.handle_response_status(response).await?;
        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ModelError::parse(e.to_string()))?;

        body.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .ok_or(ModelError::EmptyResponse)
    }

    /// Search-grounded single-shot generation, used by the web search tool.
    pub async fn generate_with_search(&self, prompt: &str) -> Result<String, ModelError> {
        let request = GenerateContentRequest {
            contents: vec![Content::user(vec![Part::text(prompt)])],
            tools: Some(vec![ToolSpec {
                google_search: Some(GoogleSearch {}),
                ..Default::default()
            }]),
            system_instruction: None,
            generation_config: Some(GenerationConfig { temperature: 0.0 }),
        };

        let content = self.send_generate(&request).await?;
        let text = extract_text(&content);
        if text.trim().is_empty() {
            return Err(ModelError::EmptyResponse);
        }
        Ok(text)
    }

    /// Video-grounded single-shot generation, used by the video Q&A tool.
    pub async fn generate_with_video(
        &self,
        prompt: &str,
        video_url: &str,
    ) -> Result<String, ModelError> {
        let request = GenerateContentRequest {
            contents: vec![Content::user(vec![
                Part::file_data(video_url, None),
                Part::text(prompt),
            ])],
            tools: None,
            system_instruction: None,
            generation_config: Some(GenerationConfig { temperature: 0.0 }),
        };

        let content = self.send_generate(&request).await?;
        let text = extract_text(&content);
        if text.trim().is_empty() {
            return Err(ModelError::EmptyResponse);
        }
        Ok(text)
    }

    /// Plain single-shot generation, used by the text decoding tool.
    pub async fn generate_text(&self, prompt: &str) -> Result<String, ModelError> {
        let request = GenerateContentRequest {
            contents: vec![Content::user(vec![Part::text(prompt)])],
            tools: None,
            system_instruction: None,
            generation_config: Some(GenerationConfig { temperature: 0.0 }),
        };

        let content = self.send_generate(&request).await?;
        let text = extract_text(&content);
        if text.trim().is_empty() {
            return Err(ModelError::EmptyResponse);
        }
        Ok(text)
    }

    /// Maps reqwest failures to model errors.
    fn map_transport_error(&self, e: reqwest::Error) -> ModelError {
        if e.is_timeout() {
            ModelError::Timeout {
                timeout_secs: self.config.timeout.as_secs() as u32,
            }
        } else if e.is_connect() {
            ModelError::network(format!("Connection failed: {}", e))
        } else {
            ModelError::network(e.to_string())
        }
    }

    /// Parses the API response status and handles errors.
    async fn handle_response_status(&self, response: Response) -> Result<Response, ModelError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 | 403 => Err(ModelError::AuthenticationFailed),
            429 => Err(ModelError::rate_limited(Self::parse_retry_after(
                &error_body,
            ))),
            400 => Err(ModelError::InvalidRequest(error_body)),
            500..=599 => Err(ModelError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(ModelError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }

    /// Parses the retry delay from a rate-limit error body.
    fn parse_retry_after(error_body: &str) -> u32 {
        // The API reports RetryInfo as e.g. "retryDelay": "14s"
        if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(error_body) {
            if let Some(details) = parsed["error"]["details"].as_array() {
                for detail in details {
                    if let Some(delay) = detail["retryDelay"].as_str() {
                        if let Ok(secs) = delay.trim_end_matches('s').parse::<u32>() {
                            return secs;
                        }
                    }
                }
            }
        }
        30
    }

    /// Guesses a MIME type from the file extension.
    fn guess_mime_type(path: &Path) -> &'static str {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("png") => "image/png",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("gif") => "image/gif",
            Some("webp") => "image/webp",
            Some("pdf") => "application/pdf",
            Some("txt") => "text/plain",
            Some("md") => "text/markdown",
            Some("py") => "text/x-python",
            Some("json") => "application/json",
            Some("mp3") => "audio/mpeg",
            Some("wav") => "audio/wav",
            Some("mp4") => "video/mp4",
            _ => "application/octet-stream",
        }
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    async fn generate(&self, request: GenerateRequest) -> Result<ModelReply, ModelError> {
        let contents: Vec<Content> = request.turns.iter().map(turn_to_content).collect();

        let tools = if request.tools.is_empty() {
            None
        } else {
            Some(vec![ToolSpec {
                function_declarations: Some(
                    request
                        .tools
                        .iter()
                        .map(|tool| tool.to_function_declaration())
                        .collect(),
                ),
                ..Default::default()
            }])
        };

        let wire_request = GenerateContentRequest {
            contents,
            tools,
            system_instruction: request.system_instruction.map(Content::system),
            generation_config: Some(GenerationConfig {
                temperature: request.temperature,
            }),
        };

        debug!(model = %self.config.model, turns = request.turns.len(), "generate");
        let content = self.send_generate(&wire_request).await?;

        let calls: Vec<ToolCall> = extract_tool_calls(&content);
        if !calls.is_empty() {
            return Ok(ModelReply::ToolCalls(calls));
        }

        let text = extract_text(&content);
        if text.trim().is_empty() {
            return Err(ModelError::EmptyResponse);
        }
        Ok(ModelReply::Text(text))
    }

    async fn upload_file(&self, path: &Path) -> Result<FileReference, ModelError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ModelError::InvalidRequest(format!("unreadable file: {}", e)))?;
        let mime_type = Self::guess_mime_type(path);
        let display_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("attachment")
            .to_string();

        let metadata = serde_json::json!({ "file": { "display_name": display_name } });
        let form = reqwest::multipart::Form::new()
            .part(
                "metadata",
                reqwest::multipart::Part::text(metadata.to_string())
                    .mime_str("application/json")
                    .map_err(|e| ModelError::InvalidRequest(e.to_string()))?,
            )
            .part(
                "file",
                reqwest::multipart::Part::bytes(bytes)
                    .file_name(display_name)
                    .mime_str(mime_type)
                    .map_err(|e| ModelError::InvalidRequest(e.to_string()))?,
            );

        let response = self
            .client
            .post(self.upload_url())
            .header("x-goog-api-key", self.config.api_key())
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let response = self.handle_response_status(response).await?;
        let body: FileUploadResponse = response
            .json()
            .await
            .map_err(|e| ModelError::parse(e.to_string()))?;

        debug!(uri = %body.file.uri, "file uploaded");
        Ok(FileReference::new(
            body.file.uri,
            body.file.mime_type.unwrap_or_else(|| mime_type.to_string()),
        ))
    }
}
