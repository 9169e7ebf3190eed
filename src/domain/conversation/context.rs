//! Per-run context shared by all stages.

use std::path::{Path, PathBuf};

use crate::domain::question::Question;
use crate::domain::run::RunId;
use crate::domain::tools::ToolCall;

use super::{FileReference, Turn};

/// The mutable state of one workflow run.
///
/// Owned exclusively by its run and mutated only by the currently executing
/// stage. The turn log is append-only: turns are never reordered or deleted,
/// so the full interaction history is always reconstructable.
#[derive(Debug, Clone)]
pub struct RunContext {
    run_id: RunId,
    question: Question,
    turns: Vec<Turn>,
    file_path: Option<PathBuf>,
}

impl RunContext {
    /// Creates a fresh context for a question.
    pub fn new(question: Question) -> Self {
        Self {
            run_id: RunId::new(),
            question,
            turns: Vec::new(),
            file_path: None,
        }
    }

    /// Returns the run identifier.
    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    /// Returns the active question.
    pub fn question(&self) -> &Question {
        &self.question
    }

    /// Returns the turn log in append order.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Returns the number of turns appended so far.
    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }

    /// Returns the path of the downloaded attachment, if any.
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Records where the attachment was downloaded to.
    pub fn set_file_path(&mut self, path: PathBuf) {
        self.file_path = Some(path);
    }

    /// Appends a turn.
    pub fn push_turn(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Appends a user-text turn.
    pub fn push_user(&mut self, text: impl Into<String>) {
        self.turns.push(Turn::user(text));
    }

    /// Appends a model-text turn.
    pub fn push_model(&mut self, text: impl Into<String>) {
        self.turns.push(Turn::model(text));
    }

    /// Appends a function-call-request turn.
    pub fn push_tool_request(&mut self, call: ToolCall) {
        self.turns.push(Turn::tool_request(call));
    }

    /// Appends a function-call-result turn.
    pub fn push_tool_result(&mut self, name: impl Into<String>, output: impl Into<String>) {
        self.turns.push(Turn::tool_result(name, output));
    }

    /// Appends a file turn.
    pub fn push_file(&mut self, reference: FileReference) {
        self.turns.push(Turn::file(reference));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> RunContext {
        RunContext::new(Question::new("t1", "What is 2+2?"))
    }

    #[test]
    fn new_context_is_empty() {
        let ctx = context();
        assert_eq!(ctx.turn_count(), 0);
        assert!(ctx.file_path().is_none());
        assert_eq!(ctx.question().task_id, "t1");
    }

    #[test]
    fn turns_keep_append_order() {
        let mut ctx = context();
        ctx.push_user("What is 2+2?");
        ctx.push_tool_request(ToolCall::new("decode_text", serde_json::json!({})));
        ctx.push_tool_result("decode_text", "hello");
        ctx.push_model("FINAL ANSWER: 4");

        let kinds: Vec<&str> = ctx
            .turns()
            .iter()
            .map(|t| match t {
                Turn::User { .. } => "user",
                Turn::Model { .. } => "model",
                Turn::ToolRequest { .. } => "tool_request",
                Turn::ToolResult { .. } => "tool_result",
                Turn::File { .. } => "file",
            })
            .collect();
        assert_eq!(kinds, vec!["user", "tool_request", "tool_result", "model"]);
    }

    #[test]
    fn turn_count_is_strictly_increasing() {
        let mut ctx = context();
        let mut last = ctx.turn_count();
        for i in 0..4 {
            ctx.push_user(format!("turn {}", i));
            assert!(ctx.turn_count() > last);
            last = ctx.turn_count();
        }
    }

    #[test]
    fn file_path_round_trips() {
        let mut ctx = context();
        ctx.set_file_path(PathBuf::from("data/t1/data.xlsx"));
        assert_eq!(ctx.file_path(), Some(Path::new("data/t1/data.xlsx")));
    }
}
