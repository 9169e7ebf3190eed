//! HTTP client for the scoring service.
//!
//! Endpoints:
//!
//! - `GET  {base}/questions`       - the current question set
//! - `GET  {base}/files/{task_id}` - a question's attachment bytes
//! - `POST {base}/submit`          - score a finished answer set

use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::debug;

use crate::domain::question::Question;
use crate::ports::{EvaluationClient, EvaluationError, Submission, SubmissionReceipt};

/// Configuration for the evaluation HTTP client.
#[derive(Debug, Clone)]
pub struct EvaluationConfig {
    /// Base URL of the scoring service.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl EvaluationConfig {
    /// Creates a configuration for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Reqwest-backed evaluation client.
pub struct HttpEvaluationClient {
    config: EvaluationConfig,
    client: Client,
}

impl HttpEvaluationClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: EvaluationConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path)
    }

    async fn check_status(response: Response) -> Result<Response, EvaluationError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let mut body = response.text().await.unwrap_or_default();
        body.truncate(512);
        Err(EvaluationError::UnexpectedStatus {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl EvaluationClient for HttpEvaluationClient {
    async fn list_questions(&self) -> Result<Vec<Question>, EvaluationError> {
        let response = self
            .client
            .get(self.url("questions"))
            .send()
            .await
            .map_err(|e| EvaluationError::transport(e.to_string()))?;

        let response = Self::check_status(response).await?;
        let questions: Vec<Question> = response
            .json()
            .await
            .map_err(|e| EvaluationError::decode(e.to_string()))?;

        debug!(count = questions.len(), "questions listed");
        Ok(questions)
    }

    async fn fetch_file(&self, question: &Question) -> Result<Vec<u8>, EvaluationError> {
        if !question.has_file() {
            return Err(EvaluationError::MissingAttachment {
                task_id: question.task_id.clone(),
            });
        }

        let response = self
            .client
            .get(self.url(&format!("files/{}", question.task_id)))
            .send()
            .await
            .map_err(|e| EvaluationError::transport(e.to_string()))?;

        let response = Self::check_status(response).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| EvaluationError::transport(e.to_string()))?;

        debug!(task_id = %question.task_id, size = bytes.len(), "file fetched");
        Ok(bytes.to_vec())
    }

    async fn submit(&self, submission: Submission) -> Result<SubmissionReceipt, EvaluationError> {
        let response = self
            .client
            .post(self.url("submit"))
            .json(&submission)
            .send()
            .await
            .map_err(|e| EvaluationError::transport(e.to_string()))?;

        let response = Self::check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| EvaluationError::decode(e.to_string()))
    }
}
