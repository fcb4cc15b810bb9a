use async_trait::async_trait;
use chrono::{DateTime, Utc};
use grandprix_core::{
    CoreError, EvaluationStatus, LeaderboardEntry, Repository, Result, Submission,
};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::db_err;

pub struct SubmissionRepository {
    pool: SqlitePool,
}

impl SubmissionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_for_user(&self, user_id: &Uuid) -> Result<Vec<Submission>> {
        let rows = sqlx::query(
            "SELECT id, user_id, team_id, task_id, filename, score, status, details, error, created_at \
             FROM submissions WHERE user_id = ?1 ORDER BY created_at DESC",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        rows.into_iter().map(row_to_submission).collect()
    }

    /// Per-team-per-task quota counter, checked before evaluation runs.
    pub async fn count_for_team_task(&self, team_id: &Uuid, task_id: u32) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM submissions WHERE team_id = ?1 AND task_id = ?2",
        )
        .bind(team_id.to_string())
        .bind(task_id as i64)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(count)
    }

    /// Best successful score per team for one task, descending.
    pub async fn leaderboard(&self, task_id: u32) -> Result<Vec<LeaderboardEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT s.team_id, t.name AS team_name,
                   MAX(s.score) AS best_score, COUNT(*) AS submissions
            FROM submissions s
            JOIN teams t ON t.id = s.team_id
            WHERE s.task_id = ?1 AND s.status = 'success'
            GROUP BY s.team_id, t.name
            ORDER BY best_score DESC
            "#,
        )
        .bind(task_id as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.into_iter()
            .map(|row| {
                let team_id: String = row.get("team_id");
                Ok(LeaderboardEntry {
                    team_id: Uuid::parse_str(&team_id)
                        .map_err(|e| CoreError::Database(e.to_string()))?,
                    team_name: row.get("team_name"),
                    task_id,
                    best_score: row.get("best_score"),
                    submissions: row.get("submissions"),
                })
            })
            .collect()
    }
}

#[async_trait]
impl Repository<Submission, String> for SubmissionRepository {
    async fn find_by_id(&self, id: &String) -> Result<Option<Submission>> {
        let row = sqlx::query(
            "SELECT id, user_id, team_id, task_id, filename, score, status, details, error, created_at \
             FROM submissions WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        row.map(row_to_submission).transpose()
    }

    async fn save(&self, submission: &Submission) -> Result<Submission> {
        let details = submission
            .details
            .as_ref()
            .map(|d| d.to_string());

        sqlx::query(
            r#"
            INSERT INTO submissions
                (id, user_id, team_id, task_id, filename, score, status, details, error, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            ON CONFLICT(id) DO UPDATE SET
                score = excluded.score,
                status = excluded.status,
                details = excluded.details,
                error = excluded.error
            "#,
        )
        .bind(&submission.id)
        .bind(submission.user_id.to_string())
        .bind(submission.team_id.to_string())
        .bind(submission.task_id as i64)
        .bind(&submission.filename)
        .bind(submission.score)
        .bind(submission.status.as_str())
        .bind(details)
        .bind(&submission.error)
        .bind(submission.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(submission.clone())
    }

    async fn delete(&self, id: &String) -> Result<()> {
        sqlx::query("DELETE FROM submissions WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}

fn row_to_submission(row: sqlx::sqlite::SqliteRow) -> Result<Submission> {
    let user_id: String = row.get("user_id");
    let team_id: String = row.get("team_id");
    let task_id: i64 = row.get("task_id");
    let status: String = row.get("status");
    let details: Option<String> = row.get("details");
    let created_at: DateTime<Utc> = row.get("created_at");

    let details = details
        .map(|d| serde_json::from_str(&d))
        .transpose()
        .map_err(|e| CoreError::Serialization(e.to_string()))?;

    Ok(Submission {
        id: row.get("id"),
        user_id: Uuid::parse_str(&user_id).map_err(|e| CoreError::Database(e.to_string()))?,
        team_id: Uuid::parse_str(&team_id).map_err(|e| CoreError::Database(e.to_string()))?,
        task_id: task_id as u32,
        filename: row.get("filename"),
        score: row.get("score"),
        status: match status.as_str() {
            "success" => EvaluationStatus::Success,
            _ => EvaluationStatus::Error,
        },
        details,
        error: row.get("error"),
        created_at,
    })
}
