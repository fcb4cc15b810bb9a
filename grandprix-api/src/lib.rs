pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod security;

pub use error::{ApiError, ApiResult};

use std::sync::Arc;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use grandprix_engine::Evaluator;
use grandprix_storage::ArtifactStore;
use sqlx::SqlitePool;

use crate::security::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub artifacts: ArtifactStore,
    pub evaluator: Arc<Evaluator>,
    pub jwt: JwtConfig,
    /// Per-team-per-task submission quota.
    pub submission_limit: i64,
}

/// Build the API router: public auth/catalog/leaderboard routes plus the
/// token-protected submission routes.
pub fn routes(state: AppState) -> Router {
    let protected = Router::new()
        .route(
            "/submissions",
            post(handlers::submissions::create).get(handlers::submissions::list),
        )
        .route("/auth/me", get(handlers::auth::me))
        .layer(from_fn_with_state(
            state.clone(),
            middleware::auth_middleware,
        ));

    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/tasks", get(handlers::tasks::list))
        .route("/tasks/:id", get(handlers::tasks::get))
        .route("/leaderboard", get(handlers::leaderboard::get))
        .merge(protected)
        .with_state(state)
}
