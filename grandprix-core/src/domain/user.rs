use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: Option<String>,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    pub team_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        username: String,
        email: Option<String>,
        hashed_password: String,
        team_id: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            hashed_password,
            team_id,
            created_at: Utc::now(),
        }
    }
}
