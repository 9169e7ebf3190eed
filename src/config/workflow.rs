//! Workflow engine configuration

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::error::ValidationError;

/// Workflow engine configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowConfig {
    /// Delay between retry attempts, in seconds
    #[serde(default = "default_retry_delay")]
    pub retry_delay_secs: u64,

    /// Maximum attempts per stage
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Overall per-run timeout in seconds
    #[serde(default = "default_run_timeout")]
    pub run_timeout_secs: u64,

    /// Scratch directory for downloaded attachments
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Directory holding one result file per answered question
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,
}

impl WorkflowConfig {
    /// Get the retry delay as Duration
    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }

    /// Get the run timeout as Duration
    pub fn run_timeout(&self) -> Duration {
        Duration::from_secs(self.run_timeout_secs)
    }

    /// Validate workflow configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_attempts == 0 {
            return Err(ValidationError::InvalidRetryAttempts);
        }
        if self.run_timeout_secs <= self.retry_delay_secs {
            return Err(ValidationError::RunTimeoutTooShort);
        }
        Ok(())
    }
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            retry_delay_secs: default_retry_delay(),
            max_attempts: default_max_attempts(),
            run_timeout_secs: default_run_timeout(),
            data_dir: default_data_dir(),
            results_dir: default_results_dir(),
        }
    }
}

fn default_retry_delay() -> u64 {
    5
}

fn default_max_attempts() -> u32 {
    3
}

fn default_run_timeout() -> u64 {
    600
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_results_dir() -> PathBuf {
    PathBuf::from("results")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = WorkflowConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.retry_delay(), Duration::from_secs(5));
    }

    #[test]
    fn zero_attempts_rejected() {
        let config = WorkflowConfig {
            max_attempts: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn run_timeout_must_exceed_retry_delay() {
        let config = WorkflowConfig {
            retry_delay_secs: 60,
            run_timeout_secs: 30,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
