//! Workflow events and stage names.

use std::path::PathBuf;

use crate::domain::question::{AnswerRecord, Question};
use crate::domain::tools::ToolCall;

/// A typed message routed between stages.
///
/// Each event is produced by one stage and consumed by exactly one
/// successor; ownership moves at the moment of routing.
#[derive(Debug, Clone)]
pub enum WorkflowEvent {
    /// Begin a run for a question.
    Start(Question),

    /// Fetch the question's attachment from the evaluation service.
    DownloadFile,

    /// Ingest the downloaded file at this path.
    UploadFile(PathBuf),

    /// Invoke the model over the accumulated context.
    CallModel,

    /// Execute the requested function calls, in order.
    CallTools(Vec<ToolCall>),

    /// Extract the scored answer from the model's final text.
    ExtractAnswer(String),

    /// Terminal event carrying the run's result.
    Stop(AnswerRecord),
}

impl WorkflowEvent {
    /// Returns the state that consumes this event.
    pub fn stage(&self) -> StageName {
        match self {
            WorkflowEvent::Start(_) => StageName::Start,
            WorkflowEvent::DownloadFile => StageName::DownloadFile,
            WorkflowEvent::UploadFile(_) => StageName::UploadFile,
            WorkflowEvent::CallModel => StageName::CallModel,
            WorkflowEvent::CallTools(_) => StageName::CallTools,
            WorkflowEvent::ExtractAnswer(_) => StageName::ExtractAnswer,
            WorkflowEvent::Stop(_) => StageName::Stop,
        }
    }
}

/// The states of the workflow state machine.
///
/// `Stop` is terminal; every other state has exactly one handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageName {
    Start,
    DownloadFile,
    UploadFile,
    CallModel,
    CallTools,
    ExtractAnswer,
    Stop,
}

impl std::fmt::Display for StageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            StageName::Start => "start",
            StageName::DownloadFile => "download_file",
            StageName::UploadFile => "upload_file",
            StageName::CallModel => "call_model",
            StageName::CallTools => "call_tools",
            StageName::ExtractAnswer => "extract_answer",
            StageName::Stop => "stop",
        };
        write!(f, "{}", s)
    }
}
