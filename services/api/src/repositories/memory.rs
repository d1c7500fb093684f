//! In-memory backend for every repository
//!
//! Used when `STORAGE=memory` and by the HTTP tests. Each map sits behind its
//! own lock, so single writes are serialized exactly like row writes are in
//! PostgreSQL and nothing more.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use common::error::{DatabaseError, DatabaseResult};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{PostRepository, ProfileRepository, UserRepository};
use crate::models::{Comment, Like, NewPost, NewUser, Post, Profile, ProfileUpdate, User};

/// Users, profiles and posts held in process memory
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    /// Keyed by owning user id
    profiles: RwLock<HashMap<Uuid, Profile>>,
    /// Newest first
    posts: RwLock<Vec<Post>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, new_user: &NewUser) -> DatabaseResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|user| user.email == new_user.email) {
            return Err(DatabaseError::Conflict("users_email_key".to_string()));
        }

        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name.clone(),
            email: new_user.email.clone(),
            password: new_user.password_hash.clone(),
            avatar: new_user.avatar.clone(),
            date: Utc::now(),
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|user| user.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }
}

#[async_trait]
impl ProfileRepository for MemoryStore {
    async fn find_by_user(&self, user_id: Uuid) -> DatabaseResult<Option<Profile>> {
        Ok(self.profiles.read().await.get(&user_id).cloned())
    }

    async fn create(&self, user_id: Uuid, update: &ProfileUpdate) -> DatabaseResult<Profile> {
        let mut profiles = self.profiles.write().await;
        if profiles.contains_key(&user_id) {
            return Err(DatabaseError::Conflict("profiles_user_id_key".to_string()));
        }

        let profile = update.clone().into_profile(user_id);
        profiles.insert(user_id, profile.clone());
        Ok(profile)
    }

    async fn update(
        &self,
        user_id: Uuid,
        update: &ProfileUpdate,
    ) -> DatabaseResult<Option<Profile>> {
        let mut profiles = self.profiles.write().await;
        Ok(profiles.get_mut(&user_id).map(|profile| {
            update.apply(profile);
            profile.clone()
        }))
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn create(&self, new_post: &NewPost) -> DatabaseResult<Post> {
        let post = Post {
            id: Uuid::new_v4(),
            user: new_post.user,
            text: new_post.text.clone(),
            name: new_post.name.clone(),
            avatar: new_post.avatar.clone(),
            likes: Vec::new(),
            comments: Vec::new(),
            date: Utc::now(),
        };
        self.posts.write().await.insert(0, post.clone());
        Ok(post)
    }

    async fn list(&self) -> DatabaseResult<Vec<Post>> {
        let mut posts = self.posts.read().await.clone();
        // Stable: posts sharing a timestamp keep their insertion order
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(posts)
    }

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<Post>> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|post| post.id == id).cloned())
    }

    async fn delete(&self, id: Uuid) -> DatabaseResult<bool> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|post| post.id != id);
        Ok(posts.len() < before)
    }

    async fn save_likes(&self, id: Uuid, likes: &[Like]) -> DatabaseResult<bool> {
        let mut posts = self.posts.write().await;
        Ok(match posts.iter_mut().find(|post| post.id == id) {
            Some(post) => {
                post.likes = likes.to_vec();
                true
            }
            None => false,
        })
    }

    async fn save_comments(&self, id: Uuid, comments: &[Comment]) -> DatabaseResult<bool> {
        let mut posts = self.posts.write().await;
        Ok(match posts.iter_mut().find(|post| post.id == id) {
            Some(post) => {
                post.comments = comments.to_vec();
                true
            }
            None => false,
        })
    }
}
