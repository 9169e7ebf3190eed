//! Question runner - drives the whole question set through the engine.
//!
//! Failed runs are logged and skipped rather than aborting the batch, and
//! questions with an existing result file are never re-run, which makes an
//! interrupted invocation resumable at question granularity.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, info};

use crate::adapters::storage::{ResultStore, StoreError};
use crate::config::EvaluationConfig;
use crate::domain::question::AnswerRecord;
use crate::ports::{EvaluationClient, EvaluationError, Submission, SubmissionReceipt, SubmittedAnswer};

use super::workflow::WorkflowEngine;

/// Runner-level failures.
///
/// Per-question workflow failures are absorbed (logged and counted); only
/// batch-level operations surface here.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// Could not list questions or submit answers.
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    /// Could not read or write a result file.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Outcome of one driver invocation.
#[derive(Debug)]
pub struct RunSummary {
    /// Questions answered during this invocation.
    pub answered: usize,
    /// Questions skipped because a result file already existed.
    pub skipped: usize,
    /// Questions whose run failed.
    pub failed: usize,
    /// Scoring receipt, when submission was enabled and attempted.
    pub receipt: Option<SubmissionReceipt>,
}

/// Drives every question of the evaluation set through the workflow engine.
pub struct QuestionRunner {
    engine: WorkflowEngine,
    evaluation: Arc<dyn EvaluationClient>,
    store: ResultStore,
    config: EvaluationConfig,
}

impl QuestionRunner {
    /// Creates a runner.
    pub fn new(
        engine: WorkflowEngine,
        evaluation: Arc<dyn EvaluationClient>,
        store: ResultStore,
        config: EvaluationConfig,
    ) -> Self {
        Self {
            engine,
            evaluation,
            store,
            config,
        }
    }

    /// Processes the full question set sequentially.
    ///
    /// Already-answered questions are loaded from the result store without
    /// invoking the engine. A failed run leaves its result absent so a later
    /// invocation retries it.
    pub async fn run_all(&self) -> Result<RunSummary, RunnerError> {
        let questions = self.evaluation.list_questions().await?;
        info!(count = questions.len(), "fetched question set");

        let mut records: Vec<AnswerRecord> = Vec::with_capacity(questions.len());
        let mut answered = 0;
        let mut skipped = 0;
        let mut failed = 0;

        for question in &questions {
            if let Some(record) = self.store.load(&question.task_id).await? {
                debug!(task_id = %question.task_id, "result exists, skipping");
                skipped += 1;
                records.push(record);
                continue;
            }

            match self.engine.run(question.clone()).await {
                Ok(record) => {
                    self.store.save(&record).await?;
                    answered += 1;
                    records.push(record);
                }
                Err(err) => {
                    error!(
                        task_id = %question.task_id,
                        stage = %err.stage(),
                        error = %err,
                        "run failed, moving on"
                    );
                    failed += 1;
                }
            }
        }

        let receipt = if self.config.submit && !records.is_empty() {
            Some(self.submit(&records).await?)
        } else {
            None
        };

        Ok(RunSummary {
            answered,
            skipped,
            failed,
            receipt,
        })
    }

    async fn submit(&self, records: &[AnswerRecord]) -> Result<SubmissionReceipt, RunnerError> {
        let submission = Submission {
            username: self.config.username.clone().unwrap_or_default(),
            agent_code: self.config.agent_code_url.clone().unwrap_or_default(),
            answers: records.iter().map(SubmittedAnswer::from).collect(),
        };

        info!(answers = submission.answers.len(), "submitting answer set");
        let receipt = self.evaluation.submit(submission).await?;
        info!(
            score = receipt.score,
            correct = receipt.correct_count,
            attempted = receipt.total_attempted,
            "submission scored"
        );
        Ok(receipt)
    }
}
