use axum::{extract::Path, Json};
use grandprix_core::TaskRegistry;

use crate::{dto::TaskResponse, error::ApiResult};

pub async fn list() -> Json<Vec<TaskResponse>> {
    Json(TaskRegistry::all().iter().map(TaskResponse::from).collect())
}

pub async fn get(Path(id): Path<u32>) -> ApiResult<Json<TaskResponse>> {
    let task = TaskRegistry::describe(id)?;
    Ok(Json(TaskResponse::from(task)))
}
