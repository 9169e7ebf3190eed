//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `GAIA_AGENT` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use gaia_agent::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Answering with {}", config.model.model);
//! ```

mod error;
mod evaluation;
mod model;
mod workflow;

pub use error::{ConfigError, ValidationError};
pub use evaluation::EvaluationConfig;
pub use model::ModelConfig;
pub use workflow::WorkflowConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Contains all configuration sections for the agent. Load using
/// [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Model provider configuration (Gemini)
    #[serde(default)]
    pub model: ModelConfig,

    /// Evaluation service configuration (question source and scoring)
    #[serde(default)]
    pub evaluation: EvaluationConfig,

    /// Workflow engine configuration (retry, timeout, directories)
    #[serde(default)]
    pub workflow: WorkflowConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `GAIA_AGENT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `GAIA_AGENT__MODEL__API_KEY=...` -> `model.api_key = ...`
    /// - `GAIA_AGENT__WORKFLOW__MAX_ATTEMPTS=5` -> `workflow.max_attempts = 5`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("GAIA_AGENT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.model.validate()?;
        self.evaluation.validate()?;
        self.workflow.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_fails_validation_without_api_key() {
        let config = AppConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_with_api_key_validates() {
        let config = AppConfig {
            model: ModelConfig {
                api_key: Some("AIza-test".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
