//! ExtractAnswer stage: reduce the draft reply to the scored answer.

use tracing::info;

use crate::application::workflow::engine::WorkflowEngine;
use crate::application::workflow::error::StageError;
use crate::application::workflow::event::WorkflowEvent;
use crate::application::workflow::prompts;
use crate::domain::conversation::{RunContext, Turn};
use crate::domain::question::AnswerRecord;
use crate::ports::{GenerateRequest, ModelError, ModelReply};

impl WorkflowEngine {
    /// Issues a second, narrowly scoped model call whose only instruction
    /// is to extract the minimal literal answer from the draft. No system
    /// persona, no tools, deterministic sampling.
    pub(crate) async fn extract_answer(
        &self,
        context: &mut RunContext,
        draft: &str,
    ) -> Result<WorkflowEvent, StageError> {
        let prompt = prompts::extraction_prompt(context.question(), draft);
        let request = GenerateRequest::new(vec![Turn::user(prompt)]).with_temperature(0.0);

        let answer = match self.model.generate(request).await? {
            ModelReply::Text(text) if !text.trim().is_empty() => text.trim().to_string(),
            ModelReply::Text(_) => return Err(StageError::Model(ModelError::EmptyResponse)),
            ModelReply::ToolCalls(_) => {
                return Err(StageError::Model(ModelError::parse(
                    "extraction call returned tool requests",
                )))
            }
        };

        info!(answer = %answer, "answer extracted");
        let record = AnswerRecord::new(context.question().clone(), answer);
        Ok(WorkflowEvent::Stop(record))
    }
}
