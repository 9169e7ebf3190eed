//! CallModel stage: one inference over the accumulated context.

use tracing::debug;

use crate::application::workflow::engine::WorkflowEngine;
use crate::application::workflow::error::StageError;
use crate::application::workflow::event::WorkflowEvent;
use crate::application::workflow::prompts;
use crate::domain::conversation::RunContext;
use crate::ports::{GenerateRequest, ModelError, ModelReply};

impl WorkflowEngine {
    /// Invokes the model with the full turn history and the tool catalog.
    ///
    /// Tool requests route to the tool stage; plain text is appended as a
    /// model turn and routes to extraction.
    pub(crate) async fn call_model(
        &self,
        context: &mut RunContext,
    ) -> Result<WorkflowEvent, StageError> {
        let request = GenerateRequest::new(context.turns().to_vec())
            .with_tools(self.catalog.definitions())
            .with_system_instruction(prompts::ANSWER_SYSTEM_INSTRUCTION)
            .with_temperature(0.0);

        match self.model.generate(request).await? {
            ModelReply::ToolCalls(calls) => {
                debug!(count = calls.len(), "model requested tools");
                Ok(WorkflowEvent::CallTools(calls))
            }
            ModelReply::Text(text) => {
                if text.trim().is_empty() {
                    return Err(StageError::Model(ModelError::EmptyResponse));
                }
                context.push_model(text.clone());
                Ok(WorkflowEvent::ExtractAnswer(text))
            }
        }
    }
}
