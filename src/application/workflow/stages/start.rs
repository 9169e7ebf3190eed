//! Start stage: seed the context and pick the first branch.

use tracing::debug;

use crate::application::workflow::engine::WorkflowEngine;
use crate::application::workflow::error::StageError;
use crate::application::workflow::event::WorkflowEvent;
use crate::application::workflow::prompts;
use crate::domain::conversation::RunContext;
use crate::domain::question::Question;

impl WorkflowEngine {
    /// Seeds the context with the initial user turn and routes to the
    /// download branch when the question carries an attachment.
    pub(crate) async fn start(
        &self,
        context: &mut RunContext,
        question: &Question,
    ) -> Result<WorkflowEvent, StageError> {
        context.push_user(prompts::initial_prompt(question));

        if question.has_file() {
            debug!(file_name = %question.file_name, "question has attachment");
            Ok(WorkflowEvent::DownloadFile)
        } else {
            Ok(WorkflowEvent::CallModel)
        }
    }
}
