//! Authentication middleware for JWT token validation

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use tracing::warn;
use uuid::Uuid;

use crate::{error::ApiError, state::AppState};

/// Alternative header carrying the raw token
pub const TOKEN_HEADER: &str = "x-auth-token";

/// Authenticated user information
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub id: Uuid,
}

/// Reject requests without a valid token, otherwise expose the caller as
/// an [`AuthUser`] request extension
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(req.headers()).ok_or(ApiError::MissingToken)?;

    let claims = state.jwt_service.validate_token(token).map_err(|e| {
        warn!("Rejected token: {}", e);
        ApiError::InvalidToken
    })?;

    req.extensions_mut().insert(AuthUser { id: claims.sub });

    Ok(next.run(req).await)
}

/// Token from `Authorization: Bearer <token>`, falling back to `x-auth-token`
fn extract_token(headers: &HeaderMap) -> Option<&str> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "));

    bearer
        .or_else(|| {
            headers
                .get(TOKEN_HEADER)
                .and_then(|header| header.to_str().ok())
        })
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
