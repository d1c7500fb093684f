//! Post model with its likes and comments

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use uuid::Uuid;

use super::user::User;

/// A like left on a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Like {
    pub user: Uuid,
}

/// A comment on a post, with the author's name and avatar copied in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub user: Uuid,
    pub text: String,
    pub name: String,
    pub avatar: String,
    pub date: DateTime<Utc>,
}

impl Comment {
    pub fn new(author: &User, text: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            user: author.id,
            text: text.trim().to_string(),
            name: author.name.clone(),
            avatar: author.avatar.clone(),
            date: Utc::now(),
        }
    }
}

/// Post entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: Uuid,
    #[sqlx(rename = "user_id")]
    pub user: Uuid,
    pub text: String,
    pub name: String,
    pub avatar: String,
    #[sqlx(json)]
    pub likes: Vec<Like>,
    #[sqlx(json)]
    pub comments: Vec<Comment>,
    pub date: DateTime<Utc>,
}

/// New post creation payload
#[derive(Debug, Clone)]
pub struct NewPost {
    pub user: Uuid,
    pub text: String,
    pub name: String,
    pub avatar: String,
}

impl NewPost {
    pub fn new(author: &User, text: &str) -> Self {
        Self {
            user: author.id,
            text: text.trim().to_string(),
            name: author.name.clone(),
            avatar: author.avatar.clone(),
        }
    }
}

/// Body of post and comment creation requests
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TextRequest {
    pub text: String,
}

/// Rule violations when modifying a post
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostError {
    #[error("Post already liked by you")]
    AlreadyLiked,

    #[error("Post has not yet been liked")]
    NotLiked,

    #[error("Comment does not exist")]
    CommentNotFound,

    #[error("User not authorized")]
    NotCommentAuthor,
}

impl Post {
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user == user_id
    }

    pub fn is_liked_by(&self, user_id: Uuid) -> bool {
        self.likes.iter().any(|like| like.user == user_id)
    }

    /// Record a like from `user_id`, newest first
    pub fn like(&mut self, user_id: Uuid) -> Result<(), PostError> {
        if self.is_liked_by(user_id) {
            return Err(PostError::AlreadyLiked);
        }
        self.likes.insert(0, Like { user: user_id });
        Ok(())
    }

    /// Remove the like left by `user_id`
    pub fn unlike(&mut self, user_id: Uuid) -> Result<(), PostError> {
        let index = self
            .likes
            .iter()
            .position(|like| like.user == user_id)
            .ok_or(PostError::NotLiked)?;
        self.likes.remove(index);
        Ok(())
    }

    /// Add a comment, newest first
    pub fn add_comment(&mut self, comment: Comment) {
        self.comments.insert(0, comment);
    }

    /// Remove a comment; only its author may do so
    pub fn remove_comment(&mut self, comment_id: Uuid, user_id: Uuid) -> Result<(), PostError> {
        let index = self
            .comments
            .iter()
            .position(|comment| comment.id == comment_id)
            .ok_or(PostError::CommentNotFound)?;

        if self.comments[index].user != user_id {
            return Err(PostError::NotCommentAuthor);
        }

        self.comments.remove(index);
        Ok(())
    }
}
