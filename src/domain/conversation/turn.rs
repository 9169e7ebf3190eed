//! Conversation turns.
//!
//! A turn is one entry in a run's conversation log: user text, model text,
//! a function-call request, a function-call result, or an ingested file
//! handle. Turns are immutable once appended.

use serde::{Deserialize, Serialize};

use crate::domain::tools::ToolCall;

/// Opaque handle to a file ingested by the model provider.
///
/// Returned by the provider's file API and replayed back to it as part of
/// the conversation; the engine never interprets the URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReference {
    /// Provider-assigned URI of the uploaded file.
    pub uri: String,
    /// MIME type recorded at upload.
    pub mime_type: String,
}

impl FileReference {
    /// Creates a new file reference.
    pub fn new(uri: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            mime_type: mime_type.into(),
        }
    }
}

/// One entry in the conversation log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Turn {
    /// Text supplied on behalf of the user.
    User { text: String },

    /// Text produced by the model.
    Model { text: String },

    /// The model's request to execute a tool.
    ToolRequest { call: ToolCall },

    /// The result of executing a requested tool.
    ToolResult { name: String, output: String },

    /// A file handle ingested via the provider's file API.
    File { reference: FileReference },
}

impl Turn {
    /// Creates a user-text turn.
    pub fn user(text: impl Into<String>) -> Self {
        Self::User { text: text.into() }
    }

    /// Creates a model-text turn.
    pub fn model(text: impl Into<String>) -> Self {
        Self::Model { text: text.into() }
    }

    /// Creates a function-call-request turn.
    pub fn tool_request(call: ToolCall) -> Self {
        Self::ToolRequest { call }
    }

    /// Creates a function-call-result turn.
    pub fn tool_result(name: impl Into<String>, output: impl Into<String>) -> Self {
        Self::ToolResult {
            name: name.into(),
            output: output.into(),
        }
    }

    /// Creates a file turn.
    pub fn file(reference: FileReference) -> Self {
        Self::File { reference }
    }

    /// Returns the text content if this is a user or model turn.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Turn::User { text } | Turn::Model { text } => Some(text),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_build_expected_variants() {
        assert!(matches!(Turn::user("hi"), Turn::User { .. }));
        assert!(matches!(Turn::model("hello"), Turn::Model { .. }));
        assert!(matches!(
            Turn::tool_request(ToolCall::new("decode_text", serde_json::json!({}))),
            Turn::ToolRequest { .. }
        ));
        assert!(matches!(
            Turn::tool_result("decode_text", "hello"),
            Turn::ToolResult { .. }
        ));
    }

    #[test]
    fn as_text_only_for_text_turns() {
        assert_eq!(Turn::user("hi").as_text(), Some("hi"));
        assert_eq!(Turn::model("hello").as_text(), Some("hello"));
        assert_eq!(Turn::tool_result("t", "out").as_text(), None);
    }

    #[test]
    fn turn_serializes_with_kind_tag() {
        let json = serde_json::to_value(Turn::user("hi")).unwrap();
        assert_eq!(json["kind"], "user");
        assert_eq!(json["text"], "hi");
    }
}
