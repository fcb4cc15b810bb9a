use chrono::{DateTime, Utc};
use grandprix_core::{Result, Team};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::db_err;

pub struct TeamRepository {
    pool: SqlitePool,
}

impl TeamRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Team>> {
        let row = sqlx::query("SELECT id, name, created_at FROM teams WHERE name = ?1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        row.map(row_to_team).transpose()
    }

    pub async fn find_by_id(&self, id: &Uuid) -> Result<Option<Team>> {
        let row = sqlx::query("SELECT id, name, created_at FROM teams WHERE id = ?1")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        row.map(row_to_team).transpose()
    }

    /// Teams are created lazily on first reference at registration time.
    pub async fn get_or_create(&self, name: &str) -> Result<Team> {
        if let Some(existing) = self.find_by_name(name).await? {
            return Ok(existing);
        }

        let team = Team::new(name.to_string());
        sqlx::query("INSERT INTO teams (id, name, created_at) VALUES (?1, ?2, ?3)")
            .bind(team.id.to_string())
            .bind(&team.name)
            .bind(team.created_at)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(team)
    }
}

fn row_to_team(row: sqlx::sqlite::SqliteRow) -> Result<Team> {
    let id: String = row.get("id");
    let created_at: DateTime<Utc> = row.get("created_at");
    Ok(Team {
        id: Uuid::parse_str(&id)
            .map_err(|e| grandprix_core::CoreError::Database(e.to_string()))?,
        name: row.get("name"),
        created_at,
    })
}
