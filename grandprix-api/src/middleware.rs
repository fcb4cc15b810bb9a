use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use grandprix_storage::UserRepository;
use uuid::Uuid;

use crate::{error::ApiError, security, AppState};

/// Authenticated caller, injected as a request extension by
/// `auth_middleware`.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub username: String,
    pub team_id: Uuid,
}

/// Bearer-token authentication: validates the JWT and resolves the user
/// row, so handlers get the team association for free.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(ApiError::Unauthorized)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(ApiError::Unauthorized)?;

    let claims = security::validate_token(&state.jwt, token)?;
    let user_id = Uuid::parse_str(&claims.sub).map_err(|_| ApiError::Unauthorized)?;

    let user = UserRepository::new(state.pool.clone())
        .find_by_id(&user_id)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    request.extensions_mut().insert(AuthUser {
        user_id: user.id,
        username: user.username,
        team_id: user.team_id,
    });

    Ok(next.run(request).await)
}
