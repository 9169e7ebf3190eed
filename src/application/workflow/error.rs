//! Workflow failure types.

use std::time::Duration;

use thiserror::Error;

use crate::adapters::spreadsheet::SpreadsheetError;
use crate::domain::tools::ToolError;
use crate::ports::{EvaluationError, ModelError};

use super::event::StageName;

/// A single stage invocation's failure.
#[derive(Debug, Error)]
pub enum StageError {
    /// Model collaborator failure.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Evaluation service failure.
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    /// A requested tool ran and failed.
    #[error("tool '{name}' failed: {source}")]
    Tool {
        /// Name of the failing tool.
        name: String,
        /// Underlying tool error.
        #[source]
        source: ToolError,
    },

    /// The model requested a tool absent from the catalog.
    ///
    /// This indicates a static mismatch between the advertised schemas and
    /// the registered tools, not a transient condition.
    #[error("unknown tool requested: {name}")]
    UnknownTool {
        /// The name the model asked for.
        name: String,
    },

    /// The attachment could not be converted to a markdown table.
    #[error(transparent)]
    Spreadsheet(#[from] SpreadsheetError),

    /// Local filesystem failure while handling the attachment.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The stage attempt outlived the run deadline.
    #[error("stage timed out after {elapsed:?}")]
    Timeout {
        /// Time budget that was exceeded.
        elapsed: Duration,
    },
}

impl StageError {
    /// Returns true if the retry policy should re-run the stage.
    pub fn is_retryable(&self) -> bool {
        match self {
            StageError::Model(e) => e.is_retryable(),
            StageError::Evaluation(e) => e.is_retryable(),
            StageError::Tool { source, .. } => source.is_retryable(),
            StageError::UnknownTool { .. } => false,
            StageError::Spreadsheet(_) => true,
            StageError::Io(_) => true,
            StageError::Timeout { .. } => true,
        }
    }
}

/// Terminal failure of one workflow run.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The stage kept failing until its attempt budget ran out.
    #[error("stage {stage} failed after {attempts} attempts: {source}")]
    StageRetriesExhausted {
        /// Stage that exhausted its retries.
        stage: StageName,
        /// Attempts made, including the first.
        attempts: u32,
        /// The final underlying error.
        #[source]
        source: StageError,
    },

    /// The stage hit a failure that must not be retried.
    #[error("stage {stage} failed: {source}")]
    StageFailed {
        /// Stage that failed.
        stage: StageName,
        /// The fatal underlying error.
        #[source]
        source: StageError,
    },
}

impl WorkflowError {
    /// Returns the stage the run failed in.
    pub fn stage(&self) -> StageName {
        match self {
            WorkflowError::StageRetriesExhausted { stage, .. } => *stage,
            WorkflowError::StageFailed { stage, .. } => *stage,
        }
    }
}
