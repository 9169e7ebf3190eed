//! Tool catalog - the closed name-to-tool map used for dispatch.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use gaia_agent::domain::tools::{Tool, ToolCatalog, ToolDefinition, ToolError, ToolFunction};
//!
//! struct Echo;
//!
//! #[async_trait]
//! impl ToolFunction for Echo {
//!     async fn call(&self, arguments: serde_json::Value) -> Result<String, ToolError> {
//!         Ok(arguments["text"].as_str().unwrap_or_default().to_string())
//!     }
//! }
//!
//! let mut catalog = ToolCatalog::new();
//! catalog
//!     .register(Tool::new(
//!         ToolDefinition::new("echo", "Echo the input", serde_json::json!({"type": "object"})),
//!         Arc::new(Echo),
//!     ))
//!     .unwrap();
//! assert!(catalog.has_tool("echo"));
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use super::{ToolDefinition, ToolFunction};

/// A registered tool: model-facing definition plus its executable function.
#[derive(Clone)]
pub struct Tool {
    definition: ToolDefinition,
    function: Arc<dyn ToolFunction>,
}

impl Tool {
    /// Creates a tool from its definition and function.
    pub fn new(definition: ToolDefinition, function: Arc<dyn ToolFunction>) -> Self {
        Self {
            definition,
            function,
        }
    }

    /// Returns the tool name.
    pub fn name(&self) -> &str {
        self.definition.name()
    }

    /// Returns the model-facing definition.
    pub fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    /// Returns the executable function.
    pub fn function(&self) -> &Arc<dyn ToolFunction> {
        &self.function
    }
}

impl std::fmt::Debug for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tool")
            .field("definition", &self.definition)
            .finish_non_exhaustive()
    }
}

/// Errors raised while building a catalog.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// A tool with this name is already registered.
    #[error("duplicate tool name: {0}")]
    DuplicateTool(String),
}

/// Closed mapping from tool name to tool.
///
/// Tool names are unique; duplicate registration is rejected so that
/// dispatch by name is always unambiguous. The catalog is built once at
/// startup and shared read-only across runs.
#[derive(Debug, Clone, Default)]
pub struct ToolCatalog {
    tools: HashMap<String, Tool>,
}

impl ToolCatalog {
    /// Creates a new empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tool.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateTool` if a tool with the same name
    /// already exists.
    pub fn register(&mut self, tool: Tool) -> Result<(), CatalogError> {
        let name = tool.name().to_string();
        if self.tools.contains_key(&name) {
            return Err(CatalogError::DuplicateTool(name));
        }
        self.tools.insert(name, tool);
        Ok(())
    }

    /// Gets a tool by name.
    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.tools.get(name)
    }

    /// Checks if a tool is registered.
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Returns all tool definitions, for model-side advertisement.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .values()
            .map(|tool| tool.definition().clone())
            .collect()
    }

    /// Returns the number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Returns true if no tools are registered.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
