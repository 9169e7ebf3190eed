//! DownloadFile stage: fetch the attachment into the scratch directory.

use tracing::info;

use crate::application::workflow::engine::WorkflowEngine;
use crate::application::workflow::error::StageError;
use crate::application::workflow::event::WorkflowEvent;
use crate::domain::conversation::RunContext;

impl WorkflowEngine {
    /// Fetches the attachment bytes and writes them under
    /// `<data_dir>/<task_id>/<file_name>`.
    pub(crate) async fn download_file(
        &self,
        context: &mut RunContext,
    ) -> Result<WorkflowEvent, StageError> {
        let question = context.question().clone();
        let bytes = self.evaluation.fetch_file(&question).await?;

        let dir = self.data_dir.join(&question.task_id);
        tokio::fs::create_dir_all(&dir).await?;
        let path = dir.join(&question.file_name);
        tokio::fs::write(&path, &bytes).await?;

        info!(path = %path.display(), size = bytes.len(), "attachment downloaded");
        context.set_file_path(path.clone());

        Ok(WorkflowEvent::UploadFile(path))
    }
}
