//! CallTools stage: execute the requested function calls in order.

use tracing::info;

use crate::application::workflow::engine::WorkflowEngine;
use crate::application::workflow::error::StageError;
use crate::application::workflow::event::WorkflowEvent;
use crate::domain::conversation::{RunContext, Turn};
use crate::domain::tools::ToolCall;

impl WorkflowEngine {
    /// Executes every call in the batch sequentially and loops back to the
    /// model so it can react to the results.
    ///
    /// Turns land in the context only once the whole batch has succeeded:
    /// a retried batch must never leave a request turn without its paired
    /// result turn.
    pub(crate) async fn call_tools(
        &self,
        context: &mut RunContext,
        calls: &[ToolCall],
    ) -> Result<WorkflowEvent, StageError> {
        let mut turns: Vec<Turn> = Vec::with_capacity(calls.len() * 2);

        for call in calls {
            let tool = self
                .catalog
                .get(call.name())
                .ok_or_else(|| StageError::UnknownTool {
                    name: call.name().to_string(),
                })?;

            turns.push(Turn::tool_request(call.clone()));

            info!(tool = call.name(), "executing tool");
            let output = tool
                .function()
                .call(call.arguments().clone())
                .await
                .map_err(|source| StageError::Tool {
                    name: call.name().to_string(),
                    source,
                })?;

            turns.push(Turn::tool_result(call.name(), output));
        }

        for turn in turns {
            context.push_turn(turn);
        }

        Ok(WorkflowEvent::CallModel)
    }
}
