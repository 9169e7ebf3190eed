//! Mock port implementations for testing.
//!
//! Scripted stand-ins for the model and evaluation collaborators, allowing
//! engine and runner tests to run without network access.
//!
//! # Features
//!
//! - Pre-configured replies consumed in order
//! - Error injection for retry and resilience testing
//! - Call tracking for verification
//!
//! # Example
//!
//! ```
//! use gaia_agent::adapters::mock::MockModelClient;
//!
//! let model = MockModelClient::new()
//!     .with_text("FINAL ANSWER: 4")
//!     .with_text("4");
//! assert_eq!(model.call_count(), 0);
//! ```

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::conversation::FileReference;
use crate::domain::question::Question;
use crate::domain::tools::ToolCall;
use crate::ports::{
    EvaluationClient, EvaluationError, GenerateRequest, ModelClient, ModelError, ModelReply,
    Submission, SubmissionReceipt,
};

/// A scripted model reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return final text.
    Text(String),
    /// Return requested tool calls.
    ToolCalls(Vec<ToolCall>),
    /// Return an error.
    Error(MockModelError),
}

/// Clonable model error scripts.
#[derive(Debug, Clone)]
pub enum MockModelError {
    /// Simulate rate limiting.
    RateLimited { retry_after_secs: u32 },
    /// Simulate provider unavailable.
    Unavailable { message: String },
    /// Simulate a network error.
    Network { message: String },
    /// Simulate an empty response.
    Empty,
    /// Simulate an authentication failure.
    AuthenticationFailed,
}

impl From<MockModelError> for ModelError {
    fn from(err: MockModelError) -> Self {
        match err {
            MockModelError::RateLimited { retry_after_secs } => {
                ModelError::rate_limited(retry_after_secs)
            }
            MockModelError::Unavailable { message } => ModelError::unavailable(message),
            MockModelError::Network { message } => ModelError::network(message),
            MockModelError::Empty => ModelError::EmptyResponse,
            MockModelError::AuthenticationFailed => ModelError::AuthenticationFailed,
        }
    }
}

/// Mock model client with scripted replies.
#[derive(Debug, Clone, Default)]
pub struct MockModelClient {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    calls: Arc<Mutex<Vec<GenerateRequest>>>,
    uploads: Arc<Mutex<Vec<PathBuf>>>,
}

impl MockModelClient {
    /// Creates a mock with no scripted replies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a text reply.
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(MockReply::Text(text.into()));
        self
    }

    /// Queues a tool-call reply.
    pub fn with_tool_calls(self, calls: Vec<ToolCall>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(MockReply::ToolCalls(calls));
        self
    }

    /// Queues an error reply.
    pub fn with_error(self, error: MockModelError) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(MockReply::Error(error));
        self
    }

    /// Number of generate calls made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Snapshot of all generate calls.
    pub fn calls(&self) -> Vec<GenerateRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Paths uploaded through the file API.
    pub fn uploads(&self) -> Vec<PathBuf> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelClient for MockModelClient {
    async fn generate(&self, request: GenerateRequest) -> Result<ModelReply, ModelError> {
        self.calls.lock().unwrap().push(request);

        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(MockReply::Text(text)) => Ok(ModelReply::Text(text)),
            Some(MockReply::ToolCalls(calls)) => Ok(ModelReply::ToolCalls(calls)),
            Some(MockReply::Error(error)) => Err(error.into()),
            None => Err(ModelError::unavailable("no scripted reply left")),
        }
    }

    async fn upload_file(&self, path: &Path) -> Result<FileReference, ModelError> {
        self.uploads.lock().unwrap().push(path.to_path_buf());
        Ok(FileReference::new(
            format!("files/mock-{}", self.uploads.lock().unwrap().len()),
            "application/octet-stream",
        ))
    }
}

/// Mock evaluation client with a fixed question set and error injection.
#[derive(Debug, Clone, Default)]
pub struct MockEvaluationClient {
    questions: Arc<Mutex<Vec<Question>>>,
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    fetch_failures: Arc<Mutex<u32>>,
    fetch_calls: Arc<Mutex<Vec<String>>>,
    submissions: Arc<Mutex<Vec<Submission>>>,
}

impl MockEvaluationClient {
    /// Creates an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the question set.
    pub fn with_questions(self, questions: Vec<Question>) -> Self {
        *self.questions.lock().unwrap() = questions;
        self
    }

    /// Registers attachment bytes for a task id.
    pub fn with_file(self, task_id: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.files.lock().unwrap().insert(task_id.into(), bytes);
        self
    }

    /// Makes the next `count` fetch_file calls fail with a transport error.
    pub fn with_fetch_failures(self, count: u32) -> Self {
        *self.fetch_failures.lock().unwrap() = count;
        self
    }

    /// Task ids fetch_file was called for, in order.
    pub fn fetch_calls(&self) -> Vec<String> {
        self.fetch_calls.lock().unwrap().clone()
    }

    /// Submissions received.
    pub fn submissions(&self) -> Vec<Submission> {
        self.submissions.lock().unwrap().clone()
    }
}

#[async_trait]
impl EvaluationClient for MockEvaluationClient {
    async fn list_questions(&self) -> Result<Vec<Question>, EvaluationError> {
        Ok(self.questions.lock().unwrap().clone())
    }

    async fn fetch_file(&self, question: &Question) -> Result<Vec<u8>, EvaluationError> {
        self.fetch_calls
            .lock()
            .unwrap()
            .push(question.task_id.clone());

        if !question.has_file() {
            return Err(EvaluationError::MissingAttachment {
                task_id: question.task_id.clone(),
            });
        }

        {
            let mut failures = self.fetch_failures.lock().unwrap();
            if *failures > 0 {
                *failures -= 1;
                return Err(EvaluationError::transport("injected failure"));
            }
        }

        self.files
            .lock()
            .unwrap()
            .get(&question.task_id)
            .cloned()
            .ok_or_else(|| EvaluationError::UnexpectedStatus {
                status: 404,
                body: format!("no file for {}", question.task_id),
            })
    }

    async fn submit(&self, submission: Submission) -> Result<SubmissionReceipt, EvaluationError> {
        let attempted = submission.answers.len() as u32;
        self.submissions.lock().unwrap().push(submission);

        Ok(SubmissionReceipt {
            score: 100.0,
            correct_count: attempted,
            total_attempted: attempted,
            message: "Scored (mock)".to_string(),
            timestamp: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_replies_come_back_in_order() {
        let model = MockModelClient::new()
            .with_text("first")
            .with_error(MockModelError::Empty)
            .with_text("second");

        let request = || GenerateRequest::new(vec![]);
        assert_eq!(
            model.generate(request()).await.unwrap(),
            ModelReply::Text("first".to_string())
        );
        assert!(matches!(
            model.generate(request()).await,
            Err(ModelError::EmptyResponse)
        ));
        assert_eq!(
            model.generate(request()).await.unwrap(),
            ModelReply::Text("second".to_string())
        );
        assert_eq!(model.call_count(), 3);
    }

    #[tokio::test]
    async fn exhausted_script_errors() {
        let model = MockModelClient::new();
        assert!(model.generate(GenerateRequest::new(vec![])).await.is_err());
    }

    #[tokio::test]
    async fn fetch_failures_drain_then_succeed() {
        let question = Question::new("t1", "q").with_file("data.csv");
        let evaluation = MockEvaluationClient::new()
            .with_file("t1", b"a,b".to_vec())
            .with_fetch_failures(2);

        assert!(evaluation.fetch_file(&question).await.is_err());
        assert!(evaluation.fetch_file(&question).await.is_err());
        assert_eq!(evaluation.fetch_file(&question).await.unwrap(), b"a,b");
        assert_eq!(evaluation.fetch_calls().len(), 3);
    }

    #[tokio::test]
    async fn fileless_question_is_a_precondition_error() {
        let evaluation = MockEvaluationClient::new();
        let err = evaluation
            .fetch_file(&Question::new("t1", "q"))
            .await
            .unwrap_err();
        assert!(matches!(err, EvaluationError::MissingAttachment { .. }));
    }
}
