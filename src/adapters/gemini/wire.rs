//! Wire types for the generative language REST API.
//!
//! Field names follow the API's camelCase convention; optional fields are
//! omitted from the payload entirely rather than sent as null.

use serde::{Deserialize, Serialize};

use crate::domain::conversation::Turn;
use crate::domain::tools::ToolCall;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolSpec>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(parts: Vec<Part>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts,
        }
    }

    pub fn model(parts: Vec<Part>) -> Self {
        Self {
            role: Some("model".to_string()),
            parts,
        }
    }

    /// System instructions carry no role.
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part::text(text)],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_response: Option<FunctionResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_data: Option<FileData>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn file_data(file_uri: impl Into<String>, mime_type: Option<String>) -> Self {
        Self {
            file_data: Some(FileData {
                file_uri: file_uri.into(),
                mime_type,
            }),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct FunctionCall {
    pub name: String,
    #[serde(default)]
    pub args: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct FunctionResponse {
    pub name: String,
    pub response: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct FileData {
    pub file_uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

/// One entry of the request's `tools` array: either declared functions or
/// the provider-side search tool.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ToolSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_declarations: Option<Vec<serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_search: Option<GoogleSearch>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub(super) struct GoogleSearch {}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GenerationConfig {
    pub temperature: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct Candidate {
    pub content: Option<Content>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct FileUploadResponse {
    pub file: UploadedFile,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct UploadedFile {
    pub uri: String,
    #[serde(default)]
    pub mime_type: Option<String>,
}

/// Converts one conversation turn into its wire representation.
pub(super) fn turn_to_content(turn: &Turn) -> Content {
    match turn {
        Turn::User { text } => Content::user(vec![Part::text(text)]),
        Turn::Model { text } => Content::model(vec![Part::text(text)]),
        Turn::ToolRequest { call } => Content::model(vec![Part {
            function_call: Some(FunctionCall {
                name: call.name().to_string(),
                args: call.arguments().clone(),
            }),
            ..Default::default()
        }]),
        Turn::ToolResult { name, output } => Content::user(vec![Part {
            function_response: Some(FunctionResponse {
                name: name.clone(),
                response: serde_json::json!({ "result": output }),
            }),
            ..Default::default()
        }]),
        Turn::File { reference } => Content::user(vec![Part::file_data(
            reference.uri.clone(),
            Some(reference.mime_type.clone()),
        )]),
    }
}

/// Extracts the requested tool calls from a response content, if any.
pub(super) fn extract_tool_calls(content: &Content) -> Vec<ToolCall> {
    content
        .parts
        .iter()
        .filter_map(|part| part.function_call.as_ref())
        .map(|call| ToolCall::new(call.name.clone(), call.args.clone()))
        .collect()
}

/// Concatenates the text parts of a response content.
pub(super) fn extract_text(content: &Content) -> String {
    content
        .parts
        .iter()
        .filter_map(|part| part.text.as_deref())
        .collect::<Vec<_>>()
        .join("")
}
