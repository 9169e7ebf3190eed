//! End-to-end workflow scenarios against scripted collaborators.

use std::sync::Arc;

use gaia_agent::adapters::mock::{MockEvaluationClient, MockModelClient, MockModelError};
use gaia_agent::adapters::storage::ResultStore;
use gaia_agent::application::workflow::{StageName, WorkflowEngine, WorkflowError};
use gaia_agent::application::QuestionRunner;
use gaia_agent::config::{EvaluationConfig, WorkflowConfig};
use gaia_agent::domain::conversation::Turn;
use gaia_agent::domain::question::{AnswerRecord, Question};
use gaia_agent::domain::tools::{Tool, ToolCall, ToolCatalog, ToolDefinition, ToolError, ToolFunction};

/// Tool returning a fixed string, standing in for real search tools.
struct StaticTool(&'static str);

#[async_trait::async_trait]
impl ToolFunction for StaticTool {
    async fn call(&self, _arguments: serde_json::Value) -> Result<String, ToolError> {
        Ok(self.0.to_string())
    }
}

fn catalog_with(name: &str, output: &'static str) -> Arc<ToolCatalog> {
    let mut catalog = ToolCatalog::new();
    catalog
        .register(Tool::new(
            ToolDefinition::new(name, "test tool", serde_json::json!({ "type": "object" })),
            Arc::new(StaticTool(output)),
        ))
        .unwrap();
    Arc::new(catalog)
}

/// Fast-retry configuration with a scratch data directory.
fn test_config(data_dir: &std::path::Path) -> WorkflowConfig {
    WorkflowConfig {
        retry_delay_secs: 0,
        max_attempts: 3,
        run_timeout_secs: 30,
        data_dir: data_dir.to_path_buf(),
        results_dir: data_dir.join("results"),
    }
}

fn engine(
    model: &MockModelClient,
    evaluation: &MockEvaluationClient,
    catalog: Arc<ToolCatalog>,
    config: &WorkflowConfig,
) -> WorkflowEngine {
    WorkflowEngine::new(
        Arc::new(model.clone()),
        Arc::new(evaluation.clone()),
        catalog,
        config,
    )
}

#[tokio::test]
async fn fileless_question_goes_straight_to_the_model() {
    let dir = tempfile::tempdir().unwrap();
    let model = MockModelClient::new()
        .with_text("The sum is 4.\n\nFINAL ANSWER: 4")
        .with_text("4");
    let evaluation = MockEvaluationClient::new();
    let engine = engine(
        &model,
        &evaluation,
        Arc::new(ToolCatalog::new()),
        &test_config(dir.path()),
    );

    let record = engine
        .run(Question::new("t1", "What is 2+2?"))
        .await
        .unwrap();

    assert_eq!(record.answer, "4");
    assert_eq!(record.question.task_id, "t1");
    // Download/upload never ran
    assert!(evaluation.fetch_calls().is_empty());
    assert!(model.uploads().is_empty());
    // One answering call plus one extraction call
    assert_eq!(model.call_count(), 2);
}

#[tokio::test]
async fn spreadsheet_attachment_becomes_a_markdown_turn() {
    let dir = tempfile::tempdir().unwrap();
    let model = MockModelClient::new()
        .with_text("FINAL ANSWER: 3")
        .with_text("3");
    let evaluation = MockEvaluationClient::new().with_file("t2", b"name,count\nalpha,1\nbeta,2".to_vec());
    let engine = engine(
        &model,
        &evaluation,
        Arc::new(ToolCatalog::new()),
        &test_config(dir.path()),
    );

    let question = Question::new("t2", "How many rows?").with_file("data.csv");
    engine.run(question).await.unwrap();

    // Downloaded exactly once, before any model call
    assert_eq!(evaluation.fetch_calls(), vec!["t2".to_string()]);
    // Spreadsheets bypass the file API
    assert!(model.uploads().is_empty());

    // The first model call saw the converted table as a user turn
    let first_call = &model.calls()[0];
    let has_table = first_call.turns.iter().any(|turn| {
        matches!(turn, Turn::User { text } if text.contains("| name | count |"))
    });
    assert!(has_table, "expected a markdown table turn");
}

#[tokio::test]
async fn binary_attachment_goes_through_the_file_api() {
    let dir = tempfile::tempdir().unwrap();
    let model = MockModelClient::new()
        .with_text("FINAL ANSWER: a bird")
        .with_text("a bird");
    let evaluation = MockEvaluationClient::new().with_file("t3", vec![0x89, 0x50, 0x4e, 0x47]);
    let engine = engine(
        &model,
        &evaluation,
        Arc::new(ToolCatalog::new()),
        &test_config(dir.path()),
    );

    let question = Question::new("t3", "What is in the image?").with_file("photo.png");
    engine.run(question).await.unwrap();

    assert_eq!(evaluation.fetch_calls(), vec!["t3".to_string()]);
    assert_eq!(model.uploads().len(), 1);
    assert!(model.uploads()[0].ends_with("t3/photo.png"));

    // The uploaded handle joined the context
    let first_call = &model.calls()[0];
    assert!(first_call
        .turns
        .iter()
        .any(|turn| matches!(turn, Turn::File { .. })));
}

#[tokio::test]
async fn tool_loop_runs_until_the_model_stops_asking() {
    let dir = tempfile::tempdir().unwrap();
    let search_call =
        || ToolCall::new("google_search", serde_json::json!({ "question": "capital of France" }));
    // Two rounds of tool calls, then a final text, then the extraction
    let model = MockModelClient::new()
        .with_tool_calls(vec![search_call()])
        .with_tool_calls(vec![search_call()])
        .with_text("It is Paris.\n\nFINAL ANSWER: Paris")
        .with_text("Paris");
    let evaluation = MockEvaluationClient::new();
    let engine = engine(
        &model,
        &evaluation,
        catalog_with("google_search", "Paris"),
        &test_config(dir.path()),
    );

    let record = engine
        .run(Question::new("t4", "What is the capital of France?"))
        .await
        .unwrap();

    assert_eq!(record.answer, "Paris");
    // N=2 tool rounds: CallModel ran N+1 times, plus one extraction call
    assert_eq!(model.call_count(), 4);

    // Context grew strictly between answering calls, and every request turn
    // is immediately followed by its result turn
    let calls = model.calls();
    assert!(calls[0].turns.len() < calls[1].turns.len());
    assert!(calls[1].turns.len() < calls[2].turns.len());
    let final_turns = &calls[2].turns;
    for (index, turn) in final_turns.iter().enumerate() {
        if matches!(turn, Turn::ToolRequest { .. }) {
            assert!(
                matches!(final_turns[index + 1], Turn::ToolResult { .. }),
                "request at {} not followed by its result",
                index
            );
        }
    }
}

#[tokio::test]
async fn unknown_tool_fails_the_run_without_retry() {
    let dir = tempfile::tempdir().unwrap();
    let model = MockModelClient::new().with_tool_calls(vec![ToolCall::new(
        "nonexistent_tool",
        serde_json::json!({}),
    )]);
    let evaluation = MockEvaluationClient::new();
    let engine = engine(
        &model,
        &evaluation,
        catalog_with("google_search", "Paris"),
        &test_config(dir.path()),
    );

    let err = engine
        .run(Question::new("t5", "Anything"))
        .await
        .unwrap_err();

    match err {
        WorkflowError::StageFailed { stage, .. } => assert_eq!(stage, StageName::CallTools),
        other => panic!("expected StageFailed, got {:?}", other),
    }
    // The model was consulted exactly once; no retry re-ran the stage
    assert_eq!(model.call_count(), 1);
}

#[tokio::test]
async fn stage_succeeds_on_the_last_allowed_attempt() {
    let dir = tempfile::tempdir().unwrap();
    let model = MockModelClient::new()
        .with_text("FINAL ANSWER: 3")
        .with_text("3");
    // max_attempts is 3: two failures then success must complete
    let evaluation = MockEvaluationClient::new()
        .with_file("t6", b"a,b\n1,2".to_vec())
        .with_fetch_failures(2);
    let engine = engine(
        &model,
        &evaluation,
        Arc::new(ToolCatalog::new()),
        &test_config(dir.path()),
    );

    let question = Question::new("t6", "How many columns?").with_file("data.csv");
    let record = engine.run(question).await.unwrap();

    assert_eq!(record.answer, "3");
    assert_eq!(evaluation.fetch_calls().len(), 3);
}

#[tokio::test]
async fn exhausted_retries_surface_the_stage_and_attempts() {
    let dir = tempfile::tempdir().unwrap();
    let model = MockModelClient::new();
    let evaluation = MockEvaluationClient::new()
        .with_file("t7", b"a,b".to_vec())
        .with_fetch_failures(3);
    let engine = engine(
        &model,
        &evaluation,
        Arc::new(ToolCatalog::new()),
        &test_config(dir.path()),
    );

    let question = Question::new("t7", "Anything").with_file("data.csv");
    let err = engine.run(question).await.unwrap_err();

    match err {
        WorkflowError::StageRetriesExhausted {
            stage, attempts, ..
        } => {
            assert_eq!(stage, StageName::DownloadFile);
            assert_eq!(attempts, 3);
        }
        other => panic!("expected StageRetriesExhausted, got {:?}", other),
    }
    // No later stage ran
    assert_eq!(model.call_count(), 0);
}

#[tokio::test]
async fn retryable_model_failure_is_absorbed() {
    let dir = tempfile::tempdir().unwrap();
    let model = MockModelClient::new()
        .with_error(MockModelError::Unavailable {
            message: "overloaded".to_string(),
        })
        .with_text("FINAL ANSWER: 4")
        .with_text("4");
    let evaluation = MockEvaluationClient::new();
    let engine = engine(
        &model,
        &evaluation,
        Arc::new(ToolCatalog::new()),
        &test_config(dir.path()),
    );

    let record = engine
        .run(Question::new("t8", "What is 2+2?"))
        .await
        .unwrap();
    assert_eq!(record.answer, "4");
    assert_eq!(model.call_count(), 3);
}

#[tokio::test]
async fn runner_skips_questions_with_existing_results() {
    let dir = tempfile::tempdir().unwrap();
    let question = Question::new("t9", "What is 2+2?");

    let store = ResultStore::new(dir.path().join("results"));
    store
        .save(&AnswerRecord::new(question.clone(), "4"))
        .await
        .unwrap();

    // No scripted replies: any engine invocation would fail the run
    let model = MockModelClient::new();
    let evaluation = MockEvaluationClient::new().with_questions(vec![question]);
    let engine = engine(
        &model,
        &evaluation,
        Arc::new(ToolCatalog::new()),
        &test_config(dir.path()),
    );
    let runner = QuestionRunner::new(
        engine,
        Arc::new(evaluation.clone()),
        store,
        EvaluationConfig::default(),
    );

    let summary = runner.run_all().await.unwrap();

    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.answered, 0);
    assert_eq!(summary.failed, 0);
    assert_eq!(model.call_count(), 0);
}

#[tokio::test]
async fn runner_continues_past_failed_questions() {
    let dir = tempfile::tempdir().unwrap();
    // First question's model call fails hard, second succeeds
    let model = MockModelClient::new()
        .with_error(MockModelError::AuthenticationFailed)
        .with_text("FINAL ANSWER: 4")
        .with_text("4");
    let evaluation = MockEvaluationClient::new().with_questions(vec![
        Question::new("bad", "Broken"),
        Question::new("good", "What is 2+2?"),
    ]);
    let config = test_config(dir.path());
    let engine = engine(&model, &evaluation, Arc::new(ToolCatalog::new()), &config);
    let store = ResultStore::new(config.results_dir.clone());
    let runner = QuestionRunner::new(
        engine,
        Arc::new(evaluation.clone()),
        store.clone(),
        EvaluationConfig::default(),
    );

    let summary = runner.run_all().await.unwrap();

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.answered, 1);
    // Failed question left no result file, so a later invocation retries it
    assert!(!store.exists("bad").await);
    assert!(store.exists("good").await);
}

#[tokio::test]
async fn runner_submits_when_enabled() {
    let dir = tempfile::tempdir().unwrap();
    let model = MockModelClient::new()
        .with_text("FINAL ANSWER: 4")
        .with_text("4");
    let evaluation =
        MockEvaluationClient::new().with_questions(vec![Question::new("t10", "What is 2+2?")]);
    let config = test_config(dir.path());
    let engine = engine(&model, &evaluation, Arc::new(ToolCatalog::new()), &config);
    let runner = QuestionRunner::new(
        engine,
        Arc::new(evaluation.clone()),
        ResultStore::new(config.results_dir.clone()),
        EvaluationConfig {
            submit: true,
            username: Some("runner".to_string()),
            ..Default::default()
        },
    );

    let summary = runner.run_all().await.unwrap();

    let receipt = summary.receipt.expect("expected a receipt");
    assert_eq!(receipt.total_attempted, 1);

    let submissions = evaluation.submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].username, "runner");
    assert_eq!(submissions[0].answers[0].task_id, "t10");
    assert_eq!(submissions[0].answers[0].submitted_answer, "4");
}

#[tokio::test]
async fn expired_deadline_drains_attempts_and_surfaces_timeout() {
    let dir = tempfile::tempdir().unwrap();
    let model = MockModelClient::new().with_text("FINAL ANSWER: 4");
    let evaluation = MockEvaluationClient::new();
    let mut config = test_config(dir.path());
    config.run_timeout_secs = 0;
    let engine = engine(
        &model,
        &evaluation,
        Arc::new(ToolCatalog::new()),
        &config,
    );

    let err = engine
        .run(Question::new("t11", "What is 2+2?"))
        .await
        .unwrap_err();

    match err {
        WorkflowError::StageRetriesExhausted {
            stage, attempts, ..
        } => {
            assert_eq!(stage, StageName::Start);
            assert_eq!(attempts, 3);
        }
        other => panic!("expected StageRetriesExhausted, got {:?}", other),
    }
    // The deadline gate never let a stage attempt begin
    assert_eq!(model.call_count(), 0);
}
