//! Login and current-user lookup

use axum::{Extension, Json, extract::State};
use tracing::{error, info};

use crate::{
    error::{ApiError, ApiResult},
    extract::JsonBody,
    middleware::AuthUser,
    models::{LoginRequest, TokenResponse, User},
    password::verify_password,
    state::AppState,
    validation::Validator,
};

/// `GET /api/auth`: the authenticated user, without password
pub async fn current_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<Json<User>> {
    let user = state
        .user_repository
        .find_by_id(auth.id)
        .await?
        .ok_or(ApiError::NotFound("User not found"))?;

    Ok(Json(user))
}

/// `POST /api/auth`: exchange credentials for a token
pub async fn login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    Validator::new()
        .email("email", &payload.email, "Please include a valid email")
        .required("password", &payload.password, "Password is required")
        .finish()?;

    let user = state
        .user_repository
        .find_by_email(payload.email.trim())
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    let is_match = verify_password(&payload.password, &user.password).map_err(|e| {
        error!("Stored password hash of user {} is unusable: {}", user.id, e);
        ApiError::InternalServerError
    })?;

    if !is_match {
        return Err(ApiError::InvalidCredentials);
    }

    info!("User {} logged in", user.id);

    let token = state.jwt_service.generate_token(user.id).map_err(|e| {
        error!("Failed to generate token: {}", e);
        ApiError::InternalServerError
    })?;

    Ok(Json(TokenResponse { token }))
}
