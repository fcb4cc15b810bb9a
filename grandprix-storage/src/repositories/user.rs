use chrono::{DateTime, Utc};
use grandprix_core::{CoreError, Result, User};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::db_err;

pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user: &User) -> Result<User> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, hashed_password, team_id, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(user.id.to_string())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.hashed_password)
        .bind(user.team_id.to_string())
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(user.clone())
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            "SELECT id, username, email, hashed_password, team_id, created_at \
             FROM users WHERE username = ?1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        row.map(row_to_user).transpose()
    }

    pub async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>> {
        let row = sqlx::query(
            "SELECT id, username, email, hashed_password, team_id, created_at \
             FROM users WHERE id = ?1",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        row.map(row_to_user).transpose()
    }
}

fn row_to_user(row: sqlx::sqlite::SqliteRow) -> Result<User> {
    let id: String = row.get("id");
    let team_id: String = row.get("team_id");
    let created_at: DateTime<Utc> = row.get("created_at");
    Ok(User {
        id: Uuid::parse_str(&id).map_err(|e| CoreError::Database(e.to_string()))?,
        username: row.get("username"),
        email: row.get("email"),
        hashed_password: row.get("hashed_password"),
        team_id: Uuid::parse_str(&team_id).map_err(|e| CoreError::Database(e.to_string()))?,
        created_at,
    })
}
