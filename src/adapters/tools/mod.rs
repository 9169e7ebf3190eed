//! Builtin tool implementations.
//!
//! The model-facing semantics mirror the tools the questions were designed
//! around: Wikipedia lookup, web search, video Q&A, and text decoding.
//! Three of the four delegate to the Gemini client's grounded helpers.

mod decode;
mod video;
mod web_search;
mod wikipedia;

pub use decode::DecodeText;
pub use video::YoutubeSearch;
pub use web_search::GoogleSearch;
pub use wikipedia::WikipediaSearch;

use std::sync::Arc;

use crate::adapters::gemini::GeminiClient;
use crate::domain::tools::{CatalogError, Tool, ToolCatalog, ToolError};

/// Assembles the catalog of builtin tools.
pub fn builtin_catalog(gemini: Arc<GeminiClient>) -> Result<ToolCatalog, CatalogError> {
    let mut catalog = ToolCatalog::new();

    catalog.register(Tool::new(
        WikipediaSearch::definition(),
        Arc::new(WikipediaSearch::new()),
    ))?;
    catalog.register(Tool::new(
        GoogleSearch::definition(),
        Arc::new(GoogleSearch::new(gemini.clone())),
    ))?;
    catalog.register(Tool::new(
        YoutubeSearch::definition(),
        Arc::new(YoutubeSearch::new(gemini.clone())),
    ))?;
    catalog.register(Tool::new(
        DecodeText::definition(),
        Arc::new(DecodeText::new(gemini)),
    ))?;

    Ok(catalog)
}

/// Pulls a required string argument out of the model-supplied JSON.
pub(super) fn required_str(
    arguments: &serde_json::Value,
    field: &str,
) -> Result<String, ToolError> {
    arguments
        .get(field)
        .and_then(|value| value.as_str())
        .map(str::to_string)
        .ok_or_else(|| ToolError::invalid_arguments(format!("missing string field `{}`", field)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_str_extracts_field() {
        let args = serde_json::json!({ "question": "capital of France" });
        assert_eq!(required_str(&args, "question").unwrap(), "capital of France");
    }

    #[test]
    fn required_str_rejects_missing_or_non_string() {
        let args = serde_json::json!({ "question": 42 });
        assert!(required_str(&args, "question").is_err());
        assert!(required_str(&args, "absent").is_err());
    }
}
