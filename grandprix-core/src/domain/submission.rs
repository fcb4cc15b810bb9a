use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::evaluation::{EvaluationResult, EvaluationStatus};

/// Short hex id used in artifact filenames, e.g. `task2_3ed2b522.py`.
pub fn generate_submission_id() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}

/// A persisted submission record: who submitted what for which task, plus
/// the evaluation outcome once it exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub id: String,
    pub user_id: Uuid,
    pub team_id: Uuid,
    pub task_id: u32,
    pub filename: String,
    pub score: f64,
    pub status: EvaluationStatus,
    pub details: Option<serde_json::Value>,
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Submission {
    pub fn new(user_id: Uuid, team_id: Uuid, task_id: u32, filename: String) -> Self {
        Self {
            id: generate_submission_id(),
            user_id,
            team_id,
            task_id,
            filename,
            score: 0.0,
            status: EvaluationStatus::Error,
            details: None,
            error: None,
            created_at: Utc::now(),
        }
    }

    /// Stamp the evaluation outcome onto the record. A failed evaluation is
    /// a final outcome; re-upload is the only retry path.
    pub fn with_result(mut self, result: &EvaluationResult) -> Self {
        self.task_id = result.task_id;
        self.score = result.score;
        self.status = result.status;
        self.details = result.details.clone();
        self.error = result.error.clone();
        self
    }
}
