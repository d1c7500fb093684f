//! Registration

use axum::{Json, extract::State};
use common::error::DatabaseError;
use tracing::{error, info};

use crate::{
    error::{ApiError, ApiResult},
    extract::JsonBody,
    gravatar::gravatar_url,
    models::{NewUser, RegisterRequest, TokenResponse},
    password::hash_password,
    state::AppState,
    validation::Validator,
};

/// `POST /api/users`: register a user and sign them in
pub async fn register(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RegisterRequest>,
) -> ApiResult<Json<TokenResponse>> {
    Validator::new()
        .required("name", &payload.name, "Name is required")
        .email("email", &payload.email, "Please include a valid email")
        .min_length(
            "password",
            &payload.password,
            6,
            "Please enter a password with 6 or more characters",
        )
        .finish()?;

    let email = payload.email.trim();

    if state.user_repository.find_by_email(email).await?.is_some() {
        return Err(ApiError::UserExists);
    }

    let password_hash = hash_password(&payload.password).map_err(|e| {
        error!("Failed to hash password: {}", e);
        ApiError::InternalServerError
    })?;

    let new_user = NewUser {
        name: payload.name.trim().to_string(),
        email: email.to_string(),
        password_hash,
        avatar: gravatar_url(email),
    };

    // A concurrent registration may have taken the email since the lookup
    let user = state
        .user_repository
        .create(&new_user)
        .await
        .map_err(|e| match e {
            DatabaseError::Conflict(_) => ApiError::UserExists,
            other => ApiError::Database(other),
        })?;

    info!("Registered user {}", user.id);

    let token = state.jwt_service.generate_token(user.id).map_err(|e| {
        error!("Failed to generate token: {}", e);
        ApiError::InternalServerError
    })?;

    Ok(Json(TokenResponse { token }))
}
