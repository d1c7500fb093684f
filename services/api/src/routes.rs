//! API service routes

use axum::{
    Json, Router, middleware,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{middleware::auth_middleware, state::AppState};

pub mod auth;
pub mod posts;
pub mod profile;
pub mod users;

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/auth", get(auth::current_user))
        .route("/profile", post(profile::upsert_profile))
        .route("/profile/me", get(profile::my_profile))
        .route("/posts", post(posts::create_post).get(posts::list_posts))
        .route("/posts/:id", get(posts::get_post).delete(posts::delete_post))
        .route("/posts/like/:id", put(posts::like_post))
        .route("/posts/unlike/:id", put(posts::unlike_post))
        .route("/posts/comment/:id", post(posts::add_comment))
        .route(
            "/posts/comment/:id/:comment_id",
            delete(posts::delete_comment),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let public_routes = Router::new()
        .route("/users", post(users::register))
        .route("/auth", post(auth::login));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api", public_routes.merge(protected_routes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness text
pub async fn root() -> &'static str {
    "API running"
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "devconnector-api"
    }))
}
