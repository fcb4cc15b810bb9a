use axum::{extract::State, http::StatusCode, Extension, Json};
use grandprix_core::User;
use grandprix_storage::{TeamRepository, UserRepository};
use validator::Validate;

use crate::{
    dto::{LoginRequest, RegisterRequest, TokenResponse, UserResponse},
    error::{ApiError, ApiResult},
    middleware::AuthUser,
    security, AppState,
};

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    payload.validate()?;

    let users = UserRepository::new(state.pool.clone());
    if users.find_by_username(&payload.username).await?.is_some() {
        return Err(ApiError::Conflict(format!(
            "Username '{}' is already taken",
            payload.username
        )));
    }

    // Solo competitors get a team named after themselves.
    let team_name = payload
        .team_name
        .unwrap_or_else(|| payload.username.clone());
    let team = TeamRepository::new(state.pool.clone())
        .get_or_create(&team_name)
        .await?;

    let user = User::new(
        payload.username,
        payload.email,
        security::hash_password(&payload.password),
        team.id,
    );
    let user = users.create(&user).await?;

    tracing::info!(username = %user.username, team = %team.name, "Registered user");
    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    payload.validate()?;

    let user = UserRepository::new(state.pool.clone())
        .find_by_username(&payload.username)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    if !security::verify_password(&payload.password, &user.hashed_password) {
        return Err(ApiError::Unauthorized);
    }

    let token = security::create_access_token(&state.jwt, &user.id)?;
    Ok(Json(TokenResponse::bearer(token)))
}

pub async fn me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<Json<UserResponse>> {
    let user = UserRepository::new(state.pool.clone())
        .find_by_id(&auth.user_id)
        .await?
        .ok_or(ApiError::Unauthorized)?;
    Ok(Json(UserResponse::from(&user)))
}
