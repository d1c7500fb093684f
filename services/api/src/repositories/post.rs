//! PostgreSQL post repository
//!
//! Likes and comments live in JSONB columns of the post row, so every
//! mutation of a post is one row write.

use async_trait::async_trait;
use chrono::Utc;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::{PgPool, types::Json};
use tracing::info;
use uuid::Uuid;

use super::PostRepository;
use crate::models::{Comment, Like, NewPost, Post};

/// Post repository backed by the `posts` table
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    /// Create a new post repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn create(&self, new_post: &NewPost) -> DatabaseResult<Post> {
        info!("Creating post for user: {}", new_post.user);

        sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (id, user_id, text, name, avatar, date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, text, name, avatar, likes, comments, date
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new_post.user)
        .bind(&new_post.text)
        .bind(&new_post.name)
        .bind(&new_post.avatar)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from_query)
    }

    async fn list(&self) -> DatabaseResult<Vec<Post>> {
        sqlx::query_as::<_, Post>(
            r#"
            SELECT id, user_id, text, name, avatar, likes, comments, date
            FROM posts
            ORDER BY date DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<Post>> {
        sqlx::query_as::<_, Post>(
            r#"
            SELECT id, user_id, text, name, avatar, likes, comments, date
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    async fn delete(&self, id: Uuid) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(result.rows_affected() > 0)
    }

    async fn save_likes(&self, id: Uuid, likes: &[Like]) -> DatabaseResult<bool> {
        let result = sqlx::query("UPDATE posts SET likes = $2 WHERE id = $1")
            .bind(id)
            .bind(Json(likes))
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(result.rows_affected() > 0)
    }

    async fn save_comments(&self, id: Uuid, comments: &[Comment]) -> DatabaseResult<bool> {
        let result = sqlx::query("UPDATE posts SET comments = $2 WHERE id = $1")
            .bind(id)
            .bind(Json(comments))
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(result.rows_affected() > 0)
    }
}
