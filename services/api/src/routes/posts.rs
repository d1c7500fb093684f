//! Posts, likes and comments
//!
//! Every mutation reads the post, applies the change in memory and writes the
//! affected list back. Concurrent requests on the same post race; the last
//! write wins.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde_json::{Value, json};
use tracing::info;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    extract::JsonBody,
    middleware::AuthUser,
    models::{Comment, Like, NewPost, Post, TextRequest, User},
    state::AppState,
    validation::Validator,
};

const POST_NOT_FOUND: &str = "Post not found";

/// `POST /api/posts`
pub async fn create_post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    JsonBody(payload): JsonBody<TextRequest>,
) -> ApiResult<Json<Post>> {
    Validator::new()
        .required("text", &payload.text, "Text is required")
        .finish()?;

    let author = load_author(&state, auth).await?;
    let post = state
        .post_repository
        .create(&NewPost::new(&author, &payload.text))
        .await?;

    info!("User {} created post {}", auth.id, post.id);
    Ok(Json(post))
}

/// `GET /api/posts`: every post, newest first
pub async fn list_posts(State(state): State<AppState>) -> ApiResult<Json<Vec<Post>>> {
    Ok(Json(state.post_repository.list().await?))
}

/// `GET /api/posts/:id`
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Post>> {
    Ok(Json(load_post(&state, &id).await?))
}

/// `DELETE /api/posts/:id`: only the owner may delete a post
pub async fn delete_post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let post = load_post(&state, &id).await?;

    if !post.is_owned_by(auth.id) {
        return Err(ApiError::NotAuthorized);
    }

    if !state.post_repository.delete(post.id).await? {
        return Err(ApiError::NotFound(POST_NOT_FOUND));
    }

    info!("User {} removed post {}", auth.id, post.id);
    Ok(Json(json!({ "msg": "Post removed" })))
}

/// `PUT /api/posts/like/:id`
pub async fn like_post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<Like>>> {
    let mut post = load_post(&state, &id).await?;
    post.like(auth.id)?;
    save_likes(&state, &post).await?;

    Ok(Json(post.likes))
}

/// `PUT /api/posts/unlike/:id`
pub async fn unlike_post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<Like>>> {
    let mut post = load_post(&state, &id).await?;
    post.unlike(auth.id)?;
    save_likes(&state, &post).await?;

    Ok(Json(post.likes))
}

/// `POST /api/posts/comment/:id`
pub async fn add_comment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<TextRequest>,
) -> ApiResult<Json<Vec<Comment>>> {
    Validator::new()
        .required("text", &payload.text, "Text is required")
        .finish()?;

    let author = load_author(&state, auth).await?;
    let mut post = load_post(&state, &id).await?;
    post.add_comment(Comment::new(&author, &payload.text));
    save_comments(&state, &post).await?;

    Ok(Json(post.comments))
}

/// `DELETE /api/posts/comment/:id/:comment_id`: only the author may delete a comment
pub async fn delete_comment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path((id, comment_id)): Path<(String, String)>,
) -> ApiResult<Json<Vec<Comment>>> {
    let mut post = load_post(&state, &id).await?;
    let comment_id =
        Uuid::parse_str(&comment_id).map_err(|_| ApiError::NotFound("Comment does not exist"))?;

    post.remove_comment(comment_id, auth.id)?;
    save_comments(&state, &post).await?;

    Ok(Json(post.comments))
}

/// Resolve a post id from the path; malformed ids are reported as unknown posts
async fn load_post(state: &AppState, id: &str) -> ApiResult<Post> {
    let id = Uuid::parse_str(id).map_err(|_| ApiError::NotFound(POST_NOT_FOUND))?;

    state
        .post_repository
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound(POST_NOT_FOUND))
}

async fn load_author(state: &AppState, auth: AuthUser) -> ApiResult<User> {
    state
        .user_repository
        .find_by_id(auth.id)
        .await?
        .ok_or(ApiError::NotFound("User not found"))
}

async fn save_likes(state: &AppState, post: &Post) -> ApiResult<()> {
    if state.post_repository.save_likes(post.id, &post.likes).await? {
        Ok(())
    } else {
        Err(ApiError::NotFound(POST_NOT_FOUND))
    }
}

async fn save_comments(state: &AppState, post: &Post) -> ApiResult<()> {
    if state
        .post_repository
        .save_comments(post.id, &post.comments)
        .await?
    {
        Ok(())
    } else {
        Err(ApiError::NotFound(POST_NOT_FOUND))
    }
}
