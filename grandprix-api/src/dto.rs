use chrono::{DateTime, Utc};
use grandprix_core::{LeaderboardEntry, Submission, Task, User};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// ===== Auth =====

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 32))]
    pub username: String,
    #[validate(length(min = 6, max = 128))]
    pub password: String,
    #[validate(email)]
    pub email: Option<String>,
    /// Defaults to a solo team named after the user.
    #[validate(length(min = 1, max = 64))]
    pub team_name: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: Option<String>,
    pub team_id: Uuid,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            team_id: user.team_id,
        }
    }
}

// ===== Tasks =====

#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub id: u32,
    pub name: &'static str,
    pub description: &'static str,
    pub function: &'static str,
    pub metric: &'static str,
    pub kind: grandprix_core::TaskKind,
}

impl From<&Task> for TaskResponse {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            name: task.name,
            description: task.description,
            function: task.signature,
            metric: task.metric,
            kind: task.kind,
        }
    }
}

// ===== Submissions =====

#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub id: String,
    pub task_id: u32,
    pub filename: String,
    pub score: f64,
    pub status: String,
    pub details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Submission> for SubmissionResponse {
    fn from(s: &Submission) -> Self {
        Self {
            id: s.id.clone(),
            task_id: s.task_id,
            filename: s.filename.clone(),
            score: s.score,
            status: s.status.as_str().to_string(),
            details: s.details.clone(),
            error: s.error.clone(),
            created_at: s.created_at,
        }
    }
}

// ===== Leaderboard =====

#[derive(Debug, Deserialize, Validate)]
pub struct LeaderboardQuery {
    pub task_id: u32,
}

#[derive(Debug, Serialize)]
pub struct LeaderboardRow {
    pub rank: usize,
    pub team: String,
    pub best_score: f64,
    pub submissions: i64,
}

impl LeaderboardRow {
    pub fn from_entry(rank: usize, entry: &LeaderboardEntry) -> Self {
        Self {
            rank,
            team: entry.team_name.clone(),
            best_score: entry.best_score,
            submissions: entry.submissions,
        }
    }
}
