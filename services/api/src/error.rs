//! Custom error types for the API service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::error::DatabaseError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::{models::PostError, validation::FieldError};

/// Custom error type for the API service
#[derive(Error, Debug)]
pub enum ApiError {
    /// One or more request fields failed validation
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    /// Unknown email or wrong password, deliberately indistinguishable
    #[error("Invalid Credentials")]
    InvalidCredentials,

    /// Registration with an email that is already taken
    #[error("User already exists")]
    UserExists,

    /// No token on a protected route
    #[error("No token, authorization denied")]
    MissingToken,

    /// Token failed signature or expiry verification
    #[error("Token is not valid")]
    InvalidToken,

    /// The caller does not own the resource
    #[error("User not authorized")]
    NotAuthorized,

    #[error("{0}")]
    NotFound(&'static str),

    /// Bad request with message
    #[error("{0}")]
    BadRequest(String),

    /// Internal server error
    #[error("Internal server error")]
    InternalServerError,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

impl From<PostError> for ApiError {
    fn from(err: PostError) -> Self {
        match err {
            PostError::AlreadyLiked | PostError::NotLiked => ApiError::BadRequest(err.to_string()),
            PostError::CommentNotFound => ApiError::NotFound("Comment does not exist"),
            PostError::NotCommentAuthor => ApiError::NotAuthorized,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, body) = match self {
            ApiError::Validation(errors) => (StatusCode::BAD_REQUEST, json!({ "errors": errors })),
            ApiError::InvalidCredentials | ApiError::UserExists => (
                StatusCode::BAD_REQUEST,
                json!({ "errors": [FieldError::general(&message)] }),
            ),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "msg": msg })),
            ApiError::MissingToken | ApiError::InvalidToken | ApiError::NotAuthorized => {
                (StatusCode::UNAUTHORIZED, json!({ "msg": message }))
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "msg": msg })),
            ApiError::InternalServerError | ApiError::Database(_) => {
                error!("Request failed: {}", message);
                return (StatusCode::INTERNAL_SERVER_ERROR, "Server Error").into_response();
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
