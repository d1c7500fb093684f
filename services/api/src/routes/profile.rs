//! Profile of the authenticated user

use axum::{Extension, Json, extract::State};
use common::error::DatabaseError;

use crate::{
    error::{ApiError, ApiResult},
    extract::JsonBody,
    middleware::AuthUser,
    models::{Profile, ProfileRequest, ProfileResponse, ProfileUpdate, UserSummary},
    state::AppState,
    validation::Validator,
};

/// `GET /api/profile/me`: the caller's profile with name and avatar populated
pub async fn my_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<Json<ProfileResponse>> {
    let profile = state
        .profile_repository
        .find_by_user(auth.id)
        .await?
        .ok_or_else(|| ApiError::BadRequest("There is no profile for this User".to_string()))?;

    let user = state
        .user_repository
        .find_by_id(auth.id)
        .await?
        .ok_or(ApiError::NotFound("User not found"))?;

    Ok(Json(ProfileResponse::new(profile, UserSummary::from(&user))))
}

/// `POST /api/profile`: create the caller's profile or update the fields sent
pub async fn upsert_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    JsonBody(payload): JsonBody<ProfileRequest>,
) -> ApiResult<Json<Profile>> {
    Validator::new()
        .required(
            "status",
            payload.status.as_deref().unwrap_or_default(),
            "Status is required",
        )
        .required(
            "skills",
            payload.skills.as_deref().unwrap_or_default(),
            "Skills is required",
        )
        .finish()?;

    let update = ProfileUpdate::from(payload);

    if let Some(profile) = state.profile_repository.update(auth.id, &update).await? {
        return Ok(Json(profile));
    }

    match state.profile_repository.create(auth.id, &update).await {
        Ok(profile) => Ok(Json(profile)),
        // Created by a concurrent request since the update missed
        Err(DatabaseError::Conflict(_)) => state
            .profile_repository
            .update(auth.id, &update)
            .await?
            .map(Json)
            .ok_or(ApiError::InternalServerError),
        Err(e) => Err(e.into()),
    }
}
