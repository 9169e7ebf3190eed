//! Core workflow engine.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::{sleep, timeout, Instant};
use tracing::{debug, info, warn, Instrument};

use crate::config::WorkflowConfig;
use crate::domain::conversation::RunContext;
use crate::domain::question::{AnswerRecord, Question};
use crate::domain::tools::ToolCatalog;
use crate::ports::{EvaluationClient, ModelClient};

use super::error::{StageError, WorkflowError};
use super::event::{StageName, WorkflowEvent};
use super::retry::RetryPolicy;

/// Executes one question to completion through the staged state machine.
///
/// The engine owns no per-run state: `run` builds a fresh [`RunContext`]
/// per question, so one engine can serve any number of runs, sequentially
/// or concurrently. The catalog and clients are shared read-only.
pub struct WorkflowEngine {
    pub(super) model: Arc<dyn ModelClient>,
    pub(super) evaluation: Arc<dyn EvaluationClient>,
    pub(super) catalog: Arc<ToolCatalog>,
    pub(super) data_dir: PathBuf,
    retry: RetryPolicy,
    run_timeout: Duration,
}

impl WorkflowEngine {
    /// Creates an engine over the given collaborators and configuration.
    pub fn new(
        model: Arc<dyn ModelClient>,
        evaluation: Arc<dyn EvaluationClient>,
        catalog: Arc<ToolCatalog>,
        config: &WorkflowConfig,
    ) -> Self {
        Self {
            model,
            evaluation,
            catalog,
            data_dir: config.data_dir.clone(),
            retry: RetryPolicy::new(config.retry_delay(), config.max_attempts),
            run_timeout: config.run_timeout(),
        }
    }

    /// Runs the workflow for one question until the stop event.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::StageRetriesExhausted`] when a stage kept
    /// failing past the attempt budget, or [`WorkflowError::StageFailed`]
    /// when a stage hit a non-retryable error.
    pub async fn run(&self, question: Question) -> Result<AnswerRecord, WorkflowError> {
        let context = RunContext::new(question.clone());
        let span = tracing::info_span!(
            "workflow_run",
            run_id = %context.run_id(),
            task_id = %question.task_id,
        );
        self.drive(question, context).instrument(span).await
    }

    /// The routing loop: from the start event to the stop event.
    async fn drive(
        &self,
        question: Question,
        mut context: RunContext,
    ) -> Result<AnswerRecord, WorkflowError> {
        let deadline = Instant::now() + self.run_timeout;
        info!(level = %question.level, "starting run");

        let mut event = WorkflowEvent::Start(question);
        loop {
            match event {
                WorkflowEvent::Stop(record) => {
                    info!(answer = %record.answer, "run complete");
                    return Ok(record);
                }
                current => {
                    event = self.run_stage(current, &mut context, deadline).await?;
                }
            }
        }
    }

    /// Invokes one stage under the retry policy and the run deadline.
    ///
    /// Every attempt is bounded by the time remaining until the deadline; a
    /// timed-out attempt counts as a retryable stage failure, so an expired
    /// deadline drains the remaining attempts and surfaces as exhaustion.
    async fn run_stage(
        &self,
        event: WorkflowEvent,
        context: &mut RunContext,
        deadline: Instant,
    ) -> Result<WorkflowEvent, WorkflowError> {
        let stage = event.stage();
        let mut attempts = 0;

        loop {
            attempts += 1;

            let remaining = deadline.saturating_duration_since(Instant::now());
            let outcome = if remaining.is_zero() {
                Err(StageError::Timeout {
                    elapsed: self.run_timeout,
                })
            } else {
                match timeout(remaining, self.dispatch(&event, context)).await {
                    Ok(result) => result,
                    Err(_) => Err(StageError::Timeout {
                        elapsed: self.run_timeout,
                    }),
                }
            };

            match outcome {
                Ok(next) => {
                    debug!(%stage, next = %next.stage(), attempts, "stage complete");
                    return Ok(next);
                }
                Err(source) if !source.is_retryable() => {
                    return Err(WorkflowError::StageFailed { stage, source });
                }
                Err(source) if !self.retry.allows_retry(attempts) => {
                    return Err(WorkflowError::StageRetriesExhausted {
                        stage,
                        attempts,
                        source,
                    });
                }
                Err(source) => {
                    warn!(%stage, attempts, error = %source, "stage failed, retrying");
                    sleep(self.retry.delay).await;
                }
            }
        }
    }

    /// The state-transition table: routes an event to its stage handler.
    ///
    /// A `Stop` event has no handler and passes through unchanged; the run
    /// loop consumes it before ever dispatching.
    async fn dispatch(
        &self,
        event: &WorkflowEvent,
        context: &mut RunContext,
    ) -> Result<WorkflowEvent, StageError> {
        match event {
            WorkflowEvent::Start(question) => self.start(context, question).await,
            WorkflowEvent::DownloadFile => self.download_file(context).await,
            WorkflowEvent::UploadFile(path) => self.upload_file(context, path).await,
            WorkflowEvent::CallModel => self.call_model(context).await,
            WorkflowEvent::CallTools(calls) => self.call_tools(context, calls).await,
            WorkflowEvent::ExtractAnswer(draft) => self.extract_answer(context, draft).await,
            WorkflowEvent::Stop(record) => Ok(WorkflowEvent::Stop(record.clone())),
        }
    }
}
