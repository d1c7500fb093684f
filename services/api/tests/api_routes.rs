//! Router-level tests running every endpoint against the in-memory store

use api::{
    AppState,
    jwt::{JwtConfig, JwtService},
    routes::create_router,
};
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

struct TestApp {
    router: Router,
    jwt_service: JwtService,
}

impl TestApp {
    fn new() -> Self {
        let jwt_service = JwtService::new(&JwtConfig {
            secret: "test-secret".to_string(),
            expiry: 360000,
        });
        let router = create_router(AppState::in_memory(jwt_service.clone()));
        Self {
            router,
            jwt_service,
        }
    }

    async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, value)
    }

    async fn register(&self, name: &str, email: &str) -> String {
        let (status, body) = self
            .request(
                Method::POST,
                "/api/users",
                None,
                Some(json!({ "name": name, "email": email, "password": "secret1" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "registration failed: {body}");
        body["token"].as_str().unwrap().to_string()
    }

    async fn create_post(&self, token: &str, text: &str) -> Value {
        let (status, post) = self
            .request(
                Method::POST,
                "/api/posts",
                Some(token),
                Some(json!({ "text": text })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        post
    }

    /// Send `body` verbatim, with an optional content type
    async fn send_raw(
        &self,
        uri: &str,
        token: Option<&str>,
        content_type: Option<&str>,
        body: &'static str,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(Method::POST).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        let request = builder.body(Body::from(body)).unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, value)
    }

    fn user_id(&self, token: &str) -> Uuid {
        self.jwt_service.validate_token(token).unwrap().sub
    }
}

#[tokio::test]
async fn test_root_and_health() {
    let app = TestApp::new();

    let (status, body) = app.request(Method::GET, "/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "API running");

    let (status, body) = app.request(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_registration_validation_lists_every_field() {
    let app = TestApp::new();

    let (status, body) = app
        .request(
            Method::POST,
            "/api/users",
            None,
            Some(json!({ "email": "not-an-email", "password": "123" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let params: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["param"].as_str().unwrap())
        .collect();
    assert_eq!(params, vec!["name", "email", "password"]);
}

#[tokio::test]
async fn test_duplicate_registration_is_rejected() {
    let app = TestApp::new();
    let token = app.register("Ada", "ada@example.com").await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/users",
            None,
            Some(json!({ "name": "Impostor", "email": "ada@example.com", "password": "secret1" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["msg"], "User already exists");

    // The first account is untouched
    let (status, user) = app.request(Method::GET, "/api/auth", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["name"], "Ada");
}

#[tokio::test]
async fn test_login_returns_token_for_the_user() {
    let app = TestApp::new();
    let registration_token = app.register("Ada", "ada@example.com").await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/auth",
            None,
            Some(json!({ "email": "ada@example.com", "password": "secret1" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let token = body["token"].as_str().unwrap();
    assert_eq!(app.user_id(token), app.user_id(&registration_token));

    let (status, user) = app.request(Method::GET, "/api/auth", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["id"], app.user_id(token).to_string());
    assert_eq!(user["email"], "ada@example.com");
    assert!(user.get("password").is_none());
    assert!(
        user["avatar"]
            .as_str()
            .unwrap()
            .starts_with("//www.gravatar.com/avatar/")
    );
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::new();
    app.register("Ada", "ada@example.com").await;

    let wrong_password = app
        .request(
            Method::POST,
            "/api/auth",
            None,
            Some(json!({ "email": "ada@example.com", "password": "wrong-password" })),
        )
        .await;
    let unknown_email = app
        .request(
            Method::POST,
            "/api/auth",
            None,
            Some(json!({ "email": "nobody@example.com", "password": "secret1" })),
        )
        .await;

    assert_eq!(wrong_password.0, StatusCode::BAD_REQUEST);
    assert_eq!(wrong_password, unknown_email);
    assert_eq!(wrong_password.1["errors"][0]["msg"], "Invalid Credentials");
}

#[tokio::test]
async fn test_protected_routes_require_a_valid_token() {
    let app = TestApp::new();

    let (status, body) = app.request(Method::GET, "/api/posts", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["msg"], "No token, authorization denied");

    let (status, body) = app
        .request(Method::GET, "/api/posts", Some("forged.token.value"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["msg"], "Token is not valid");

    let other_service = JwtService::new(&JwtConfig {
        secret: "another-secret".to_string(),
        expiry: 60,
    });
    let foreign = other_service.generate_token(Uuid::new_v4()).unwrap();
    let (status, _) = app
        .request(Method::GET, "/api/auth", Some(&foreign), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_header_is_accepted() {
    let app = TestApp::new();
    let token = app.register("Ada", "ada@example.com").await;

    let request = Request::builder()
        .uri("/api/auth")
        .header("x-auth-token", &token)
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_profile_upsert_keeps_absent_fields() {
    let app = TestApp::new();
    let token = app.register("Ada", "ada@example.com").await;

    let (status, body) = app
        .request(Method::GET, "/api/profile/me", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "There is no profile for this User");

    let (status, created) = app
        .request(
            Method::POST,
            "/api/profile",
            Some(&token),
            Some(json!({
                "status": "Junior",
                "skills": "html",
                "bio": "Writes software",
                "twitter": "https://twitter.com/ada"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, updated) = app
        .request(
            Method::POST,
            "/api/profile",
            Some(&token),
            Some(json!({ "status": "Dev", "skills": "js, go" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["status"], "Dev");
    assert_eq!(updated["skills"], json!(["js", "go"]));
    assert_eq!(updated["bio"], "Writes software");
    assert_eq!(updated["social"]["twitter"], "https://twitter.com/ada");

    let (status, mine) = app
        .request(Method::GET, "/api/profile/me", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mine["user"]["name"], "Ada");
    assert_eq!(mine["user"]["id"], app.user_id(&token).to_string());
    assert_eq!(mine["skills"], json!(["js", "go"]));
}

#[tokio::test]
async fn test_profile_requires_status_and_skills() {
    let app = TestApp::new();
    let token = app.register("Ada", "ada@example.com").await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/profile",
            Some(&token),
            Some(json!({ "bio": "Writes software" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["param"], "status");
    assert_eq!(body["errors"][1]["param"], "skills");
}

#[tokio::test]
async fn test_posts_are_listed_newest_first() {
    let app = TestApp::new();
    let token = app.register("Ada", "ada@example.com").await;

    let first = app.create_post(&token, "first").await;
    let second = app.create_post(&token, "second").await;
    assert_eq!(first["name"], "Ada");

    let (status, posts) = app.request(Method::GET, "/api/posts", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(posts[0]["id"], second["id"]);
    assert_eq!(posts[1]["id"], first["id"]);
}

#[tokio::test]
async fn test_empty_post_is_rejected() {
    let app = TestApp::new();
    let token = app.register("Ada", "ada@example.com").await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/posts",
            Some(&token),
            Some(json!({ "text": "   " })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["msg"], "Text is required");
}

#[tokio::test]
async fn test_only_the_owner_deletes_a_post() {
    let app = TestApp::new();
    let owner = app.register("Ada", "ada@example.com").await;
    let other = app.register("Grace", "grace@example.com").await;
    let post = app.create_post(&owner, "mine").await;
    let uri = format!("/api/posts/{}", post["id"].as_str().unwrap());

    let (status, body) = app.request(Method::DELETE, &uri, Some(&other), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["msg"], "User not authorized");

    let (status, unchanged) = app.request(Method::GET, &uri, Some(&other), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(unchanged, post);

    let (status, body) = app.request(Method::DELETE, &uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["msg"], "Post removed");

    let (status, body) = app.request(Method::GET, &uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["msg"], "Post not found");
}

#[tokio::test]
async fn test_unknown_post_ids_are_not_found() {
    let app = TestApp::new();
    let token = app.register("Ada", "ada@example.com").await;

    for uri in [
        format!("/api/posts/{}", Uuid::new_v4()),
        "/api/posts/not-a-uuid".to_string(),
    ] {
        let (status, body) = app.request(Method::DELETE, &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["msg"], "Post not found");
    }

    for id in [Uuid::new_v4().to_string(), "not-a-uuid".to_string()] {
        let requests = [
            (Method::PUT, format!("/api/posts/like/{id}"), None),
            (Method::PUT, format!("/api/posts/unlike/{id}"), None),
            (
                Method::POST,
                format!("/api/posts/comment/{id}"),
                Some(json!({ "text": "Nice" })),
            ),
            (
                Method::DELETE,
                format!("/api/posts/comment/{id}/{}", Uuid::new_v4()),
                None,
            ),
        ];

        for (method, uri, body) in requests {
            let (status, response) = app.request(method, &uri, Some(&token), body).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            assert_eq!(response["msg"], "Post not found", "{uri}");
        }
    }
}

#[tokio::test]
async fn test_like_twice_is_rejected() {
    let app = TestApp::new();
    let token = app.register("Ada", "ada@example.com").await;
    let post = app.create_post(&token, "like me").await;
    let id = post["id"].as_str().unwrap();
    let like_uri = format!("/api/posts/like/{id}");
    let unlike_uri = format!("/api/posts/unlike/{id}");

    let (status, likes) = app.request(Method::PUT, &like_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(likes, json!([{ "user": app.user_id(&token).to_string() }]));

    let (status, body) = app.request(Method::PUT, &like_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "Post already liked by you");

    let (_, stored) = app
        .request(Method::GET, &format!("/api/posts/{id}"), Some(&token), None)
        .await;
    assert_eq!(stored["likes"].as_array().unwrap().len(), 1);

    let (status, likes) = app
        .request(Method::PUT, &unlike_uri, Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(likes, json!([]));

    let (status, body) = app
        .request(Method::PUT, &unlike_uri, Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "Post has not yet been liked");
}

#[tokio::test]
async fn test_comment_lifecycle() {
    let app = TestApp::new();
    let owner = app.register("Ada", "ada@example.com").await;
    let commenter = app.register("Grace", "grace@example.com").await;
    let post = app.create_post(&owner, "discuss").await;
    let id = post["id"].as_str().unwrap();

    let (status, comments) = app
        .request(
            Method::POST,
            &format!("/api/posts/comment/{id}"),
            Some(&commenter),
            Some(json!({ "text": "First!" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(comments[0]["name"], "Grace");
    assert_eq!(comments[0]["text"], "First!");
    let comment_id = comments[0]["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .request(
            Method::DELETE,
            &format!("/api/posts/comment/{id}/{}", Uuid::new_v4()),
            Some(&commenter),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["msg"], "Comment does not exist");

    let delete_uri = format!("/api/posts/comment/{id}/{comment_id}");
    let (status, body) = app
        .request(Method::DELETE, &delete_uri, Some(&owner), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["msg"], "User not authorized");

    let (status, comments) = app
        .request(Method::DELETE, &delete_uri, Some(&commenter), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(comments, json!([]));
}

#[tokio::test]
async fn test_missing_body_reports_missing_fields() {
    let app = TestApp::new();

    let (status, body) = app.send_raw("/api/users", None, None, "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let params: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["param"].as_str().unwrap())
        .collect();
    assert_eq!(params, vec!["name", "email", "password"]);

    let token = app.register("Ada", "ada@example.com").await;
    let (status, body) = app
        .send_raw("/api/posts", Some(&token), Some("application/json"), "")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["param"], "text");
}

#[tokio::test]
async fn test_unreadable_bodies_are_bad_requests() {
    let app = TestApp::new();

    let (status, body) = app
        .send_raw(
            "/api/users",
            None,
            Some("application/json"),
            r#"{"name":5,"email":"ada@example.com","password":"secret1"}"#,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["msg"].as_str().unwrap().starts_with("Invalid request body"));

    let (status, body) = app
        .send_raw("/api/auth", None, Some("application/json"), "{not json")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["msg"].as_str().unwrap().starts_with("Invalid request body"));

    // Nothing was registered by the rejected request
    let (status, body) = app
        .request(
            Method::POST,
            "/api/auth",
            None,
            Some(json!({ "email": "ada@example.com", "password": "secret1" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["msg"], "Invalid Credentials");
}
