//! UploadFile stage: ingest the attachment into the conversation.

use std::path::Path;

use tracing::{debug, info};

use crate::adapters::spreadsheet;
use crate::application::workflow::engine::WorkflowEngine;
use crate::application::workflow::error::StageError;
use crate::application::workflow::event::WorkflowEvent;
use crate::domain::conversation::RunContext;

impl WorkflowEngine {
    /// Makes the downloaded file visible to the model.
    ///
    /// Spreadsheets become a markdown-table user turn; anything else goes
    /// through the provider's file API and joins the context as a handle.
    pub(crate) async fn upload_file(
        &self,
        context: &mut RunContext,
        path: &Path,
    ) -> Result<WorkflowEvent, StageError> {
        if spreadsheet::is_spreadsheet(path) {
            let table = spreadsheet::to_markdown(path)?;
            let file_name = &context.question().file_name;
            debug!(file_name = %file_name, "spreadsheet converted to markdown");
            context.push_user(format!("Contents of {}:\n\n{}", file_name, table));
        } else {
            let reference = self.model.upload_file(path).await?;
            info!(uri = %reference.uri, "file ingested by provider");
            context.push_file(reference);
        }

        Ok(WorkflowEvent::CallModel)
    }
}
