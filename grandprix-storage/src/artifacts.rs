use std::path::PathBuf;

use grandprix_core::{generate_submission_id, CoreError, Result};

/// Filesystem store for uploaded submission artifacts. The evaluation core
/// only ever reads from here; upload, naming and retention are owned by the
/// transport layer through this store.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    submissions_dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(submissions_dir: impl Into<PathBuf>) -> Self {
        Self {
            submissions_dir: submissions_dir.into(),
        }
    }

    /// Create the backing directory if it does not exist yet.
    pub fn ensure_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.submissions_dir)
            .map_err(|e| CoreError::Internal(format!("submissions dir: {}", e)))
    }

    pub fn path_for(&self, task_id: u32, submission_id: &str) -> PathBuf {
        self.submissions_dir
            .join(format!("task{}_{}.py", task_id, submission_id))
    }

    /// Persist an uploaded artifact under a fresh submission id and return
    /// `(submission_id, path)`.
    pub fn save(&self, task_id: u32, contents: &[u8]) -> Result<(String, PathBuf)> {
        self.ensure_dir()?;
        let submission_id = generate_submission_id();
        let path = self.path_for(task_id, &submission_id);
        std::fs::write(&path, contents)
            .map_err(|e| CoreError::Internal(format!("{}: {}", path.display(), e)))?;
        tracing::debug!(path = %path.display(), "Stored submission artifact");
        Ok((submission_id, path))
    }
}
