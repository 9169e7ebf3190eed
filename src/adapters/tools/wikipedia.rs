//! Wikipedia lookup tool.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::info;

use crate::domain::tools::{ToolDefinition, ToolError, ToolFunction};

use super::required_str;

const API_URL: &str = "https://en.wikipedia.org/w/api.php";

/// Searches Wikipedia and returns the top result's plain-text extract.
pub struct WikipediaSearch {
    client: Client,
}

impl WikipediaSearch {
    /// Creates the tool with a fresh HTTP client.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Model-facing definition.
    pub fn definition() -> ToolDefinition {
        ToolDefinition::new(
            "wikipedia_search",
            "Search Wikipedia for a given title and return the content of the \
             top result. Use this tool whenever you need encyclopedic \
             information about a person, place, work, or event.",
            serde_json::json!({
                "type": "object",
                "required": ["wikipedia_title"],
                "properties": {
                    "wikipedia_title": {
                        "type": "string",
                        "description": "The title to search for on Wikipedia."
                    }
                }
            }),
        )
    }

    async fn top_title(&self, query: &str) -> Result<Option<String>, ToolError> {
        let response = self
            .client
            .get(API_URL)
            .query(&[
                ("action", "query"),
                ("list", "search"),
                ("srsearch", query),
                ("srlimit", "1"),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(|e| ToolError::transport(e.to_string()))?;

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| ToolError::failed(e.to_string()))?;

        Ok(body.query.search.into_iter().next().map(|hit| hit.title))
    }

    async fn extract(&self, title: &str) -> Result<String, ToolError> {
        let response = self
            .client
            .get(API_URL)
            .query(&[
                ("action", "query"),
                ("prop", "extracts"),
                ("explaintext", "1"),
                ("titles", title),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(|e| ToolError::transport(e.to_string()))?;

        let body: ExtractResponse = response
            .json()
            .await
            .map_err(|e| ToolError::failed(e.to_string()))?;

        body.query
            .pages
            .into_values()
            .next()
            .and_then(|page| page.extract)
            .ok_or_else(|| ToolError::failed(format!("no extract for page '{}'", title)))
    }
}

impl Default for WikipediaSearch {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolFunction for WikipediaSearch {
    async fn call(&self, arguments: serde_json::Value) -> Result<String, ToolError> {
        let query = required_str(&arguments, "wikipedia_title")?;
        info!(query = %query, "searching Wikipedia");

        let Some(title) = self.top_title(&query).await? else {
            return Ok("No results found.".to_string());
        };

        let content = self.extract(&title).await?;
        Ok(format!("{}\n```\n{}\n```\n", title, content))
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    query: SearchQuery,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ExtractResponse {
    query: ExtractQuery,
}

#[derive(Debug, Deserialize)]
struct ExtractQuery {
    #[serde(default)]
    pages: std::collections::HashMap<String, ExtractPage>,
}

#[derive(Debug, Deserialize)]
struct ExtractPage {
    extract: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definition_declares_required_title() {
        let def = WikipediaSearch::definition();
        assert_eq!(def.name(), "wikipedia_search");
        assert_eq!(def.parameters_schema()["required"][0], "wikipedia_title");
    }

    #[tokio::test]
    async fn missing_argument_is_invalid() {
        let tool = WikipediaSearch::new();
        let err = tool.call(serde_json::json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[test]
    fn search_response_deserializes() {
        let json = r#"{ "query": { "search": [ { "title": "Mercedes Sosa" } ] } }"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.query.search[0].title, "Mercedes Sosa");
    }
}
