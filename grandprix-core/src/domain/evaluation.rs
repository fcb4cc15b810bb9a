use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationStatus {
    Success,
    Error,
}

impl EvaluationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EvaluationStatus::Success => "success",
            EvaluationStatus::Error => "error",
        }
    }
}

/// Outcome of one evaluation call. Immutable after creation; persisted by
/// the caller. The task id is re-stamped from the id the evaluation was
/// actually performed against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvaluationResult {
    pub task_id: u32,
    pub score: f64,
    pub status: EvaluationStatus,
    pub details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EvaluationResult {
    pub fn success(task_id: u32, score: f64, details: serde_json::Value) -> Self {
        Self {
            task_id,
            score,
            status: EvaluationStatus::Success,
            details: Some(details),
            error: None,
        }
    }

    /// Normalized failure shape: zero score, error status, message in
    /// `error`. Artifact failures never propagate past this.
    pub fn failure(task_id: u32, message: impl Into<String>) -> Self {
        Self {
            task_id,
            score: 0.0,
            status: EvaluationStatus::Error,
            details: None,
            error: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == EvaluationStatus::Success
    }
}
