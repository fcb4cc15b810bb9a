use axum::{
    extract::{Query, State},
    Json,
};
use grandprix_core::TaskRegistry;
use grandprix_storage::SubmissionRepository;

use crate::{
    dto::{LeaderboardQuery, LeaderboardRow},
    error::ApiResult,
    AppState,
};

pub async fn get(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> ApiResult<Json<Vec<LeaderboardRow>>> {
    // Unknown task ids 404 before the query runs.
    TaskRegistry::describe(query.task_id)?;

    let entries = SubmissionRepository::new(state.pool.clone())
        .leaderboard(query.task_id)
        .await?;

    let rows = entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| LeaderboardRow::from_entry(idx + 1, entry))
        .collect();
    Ok(Json(rows))
}
