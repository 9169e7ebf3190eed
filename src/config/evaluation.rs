//! Evaluation service configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Evaluation service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluationConfig {
    /// Base URL of the scoring service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Username used when submitting answers
    pub username: Option<String>,

    /// Public URL of the agent code, sent alongside submissions
    pub agent_code_url: Option<String>,

    /// Whether to submit collected answers at the end of a run
    #[serde(default)]
    pub submit: bool,
}

impl EvaluationConfig {
    /// Validate evaluation configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.base_url.starts_with("http") {
            return Err(ValidationError::InvalidBaseUrl("evaluation.base_url"));
        }
        if self.submit && !self.username.as_ref().is_some_and(|u| !u.is_empty()) {
            return Err(ValidationError::MissingSubmissionIdentity);
        }
        Ok(())
    }
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            username: None,
            agent_code_url: None,
            submit: false,
        }
    }
}

fn default_base_url() -> String {
    "https://agents-course-unit4-scoring.hf.space".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_scoring_service() {
        let config = EvaluationConfig::default();
        assert!(config.base_url.contains("scoring"));
        assert!(!config.submit);
    }

    #[test]
    fn validation_passes_without_submission() {
        let config = EvaluationConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn submission_requires_username() {
        let config = EvaluationConfig {
            submit: true,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = EvaluationConfig {
            submit: true,
            username: Some("runner".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
