//! JSON result store.
//!
//! One pretty-printed file per answered question, keyed by task id. The
//! runner checks the store before invoking the engine, which makes an
//! interrupted batch resumable.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::domain::question::AnswerRecord;

/// Result store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Filesystem-backed store of answer records.
#[derive(Debug, Clone)]
pub struct ResultStore {
    dir: PathBuf,
}

impl ResultStore {
    /// Creates a store rooted at `dir`. The directory is created lazily on
    /// first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the file path for a task id.
    pub fn path_for(&self, task_id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", task_id))
    }

    /// Returns true if a result exists for the task id.
    pub async fn exists(&self, task_id: &str) -> bool {
        tokio::fs::try_exists(self.path_for(task_id))
            .await
            .unwrap_or(false)
    }

    /// Loads the record for a task id, if present.
    pub async fn load(&self, task_id: &str) -> Result<Option<AnswerRecord>, StoreError> {
        let path = self.path_for(task_id);
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(serde_json::from_str(&contents)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Saves a record, creating the store directory if needed.
    pub async fn save(&self, record: &AnswerRecord) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(&record.question.task_id);
        let contents = serde_json::to_string_pretty(record)?;
        tokio::fs::write(&path, contents).await?;
        debug!(path = %path.display(), "result saved");
        Ok(())
    }

    /// Returns the store's root directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
