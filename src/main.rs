//! Binary entrypoint: answer the evaluation question set.

use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use gaia_agent::adapters::evaluation::{HttpEvaluationClient, HttpEvaluationConfig};
use gaia_agent::adapters::gemini::{GeminiClient, GeminiConfig};
use gaia_agent::adapters::storage::ResultStore;
use gaia_agent::adapters::tools::builtin_catalog;
use gaia_agent::application::{QuestionRunner, WorkflowEngine};
use gaia_agent::config::AppConfig;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,gaia_agent=debug")),
        )
        .init();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = config.validate() {
        error!(error = %e, "invalid configuration");
        return ExitCode::FAILURE;
    }

    let gemini = Arc::new(GeminiClient::new(
        GeminiConfig::new(config.model.api_key.clone().unwrap_or_default())
            .with_model(&config.model.model)
            .with_base_url(&config.model.base_url)
            .with_timeout(config.model.timeout()),
    ));

    let evaluation = Arc::new(HttpEvaluationClient::new(HttpEvaluationConfig::new(
        &config.evaluation.base_url,
    )));

    let catalog = match builtin_catalog(gemini.clone()) {
        Ok(catalog) => Arc::new(catalog),
        Err(e) => {
            error!(error = %e, "failed to build tool catalog");
            return ExitCode::FAILURE;
        }
    };
    info!(tools = catalog.len(), model = %config.model.model, "agent ready");

    let engine = WorkflowEngine::new(
        gemini,
        evaluation.clone(),
        catalog,
        &config.workflow,
    );

    let store = ResultStore::new(config.workflow.results_dir.join(&config.model.model));
    let runner = QuestionRunner::new(engine, evaluation, store, config.evaluation.clone());

    match runner.run_all().await {
        Ok(summary) => {
            info!(
                answered = summary.answered,
                skipped = summary.skipped,
                failed = summary.failed,
                "batch complete"
            );
            if let Some(receipt) = summary.receipt {
                info!(
                    score = receipt.score,
                    correct = receipt.correct_count,
                    attempted = receipt.total_attempted,
                    message = %receipt.message,
                    "submission receipt"
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "batch failed");
            ExitCode::FAILURE
        }
    }
}
