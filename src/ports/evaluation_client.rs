//! Evaluation Client Port - interface to the question source and scoring service.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::question::{AnswerRecord, Question};

/// Port for the evaluation service.
///
/// Implementations talk to the remote scoring API; mocks script the same
/// surface for engine and runner tests.
#[async_trait]
pub trait EvaluationClient: Send + Sync {
    /// Lists the current question set.
    async fn list_questions(&self) -> Result<Vec<Question>, EvaluationError>;

    /// Fetches the attachment bytes for a question.
    ///
    /// # Errors
    ///
    /// Returns `EvaluationError::MissingAttachment` if the question has no
    /// file attached.
    async fn fetch_file(&self, question: &Question) -> Result<Vec<u8>, EvaluationError>;

    /// Submits a finished answer set for scoring.
    async fn submit(&self, submission: Submission) -> Result<SubmissionReceipt, EvaluationError>;
}

/// One answer in a submission payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmittedAnswer {
    /// Task identifier of the answered question.
    pub task_id: String,
    /// The extracted answer string.
    pub submitted_answer: String,
}

impl From<&AnswerRecord> for SubmittedAnswer {
    fn from(record: &AnswerRecord) -> Self {
        Self {
            task_id: record.question.task_id.clone(),
            submitted_answer: record.answer.clone(),
        }
    }
}

/// A full answer-set submission.
#[derive(Debug, Clone, Serialize)]
pub struct Submission {
    /// Identity submitting the answers.
    pub username: String,
    /// Public URL of the agent code.
    pub agent_code: String,
    /// The answers, one per attempted question.
    pub answers: Vec<SubmittedAnswer>,
}

/// Scoring receipt returned by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionReceipt {
    /// Overall score in percent.
    pub score: f64,
    /// Number of correct answers.
    pub correct_count: u32,
    /// Number of attempted answers.
    pub total_attempted: u32,
    /// Service message.
    pub message: String,
    /// When the submission was scored.
    pub timestamp: DateTime<Utc>,
}

/// Evaluation service errors.
#[derive(Debug, thiserror::Error)]
pub enum EvaluationError {
    /// Network failure reaching the service.
    #[error("transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        body: String,
    },

    /// The response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// A file operation was requested for a question without an attachment.
    #[error("question {task_id} has no file attached")]
    MissingAttachment {
        /// Task identifier of the offending question.
        task_id: String,
    },
}

impl EvaluationError {
    /// Creates a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Returns true if this error is retryable.
    ///
    /// A missing attachment is a precondition violation, not a transient
    /// condition.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, EvaluationError::MissingAttachment { .. })
    }
}
