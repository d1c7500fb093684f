//! Repositories for database operations
//!
//! Each store is a trait so handlers can run on PostgreSQL or on the
//! in-memory backend. Every mutation is a single-document write; handlers
//! perform their read-modify-write sequences without locking.

use async_trait::async_trait;
use common::error::DatabaseResult;
use uuid::Uuid;

use crate::models::{Comment, Like, NewPost, NewUser, Post, Profile, ProfileUpdate, User};

pub mod memory;
pub mod post;
pub mod profile;
pub mod user;

pub use memory::MemoryStore;
pub use post::PgPostRepository;
pub use profile::PgProfileRepository;
pub use user::PgUserRepository;

/// Account storage
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user; a taken email yields `DatabaseError::Conflict`
    async fn create(&self, new_user: &NewUser) -> DatabaseResult<User>;

    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>>;

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<User>>;
}

/// Profile storage, keyed by owning user
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_by_user(&self, user_id: Uuid) -> DatabaseResult<Option<Profile>>;

    /// Create the profile of `user_id`; an existing one yields `DatabaseError::Conflict`
    async fn create(&self, user_id: Uuid, update: &ProfileUpdate) -> DatabaseResult<Profile>;

    /// Apply a partial update, `None` if the user has no profile
    async fn update(&self, user_id: Uuid, update: &ProfileUpdate)
    -> DatabaseResult<Option<Profile>>;
}

/// Post storage
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create(&self, new_post: &NewPost) -> DatabaseResult<Post>;

    /// All posts, newest first
    async fn list(&self) -> DatabaseResult<Vec<Post>>;

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<Post>>;

    /// Returns false if the post did not exist
    async fn delete(&self, id: Uuid) -> DatabaseResult<bool>;

    /// Overwrite the likes of a post, false if the post did not exist
    async fn save_likes(&self, id: Uuid, likes: &[Like]) -> DatabaseResult<bool>;

    /// Overwrite the comments of a post, false if the post did not exist
    async fn save_comments(&self, id: Uuid, comments: &[Comment]) -> DatabaseResult<bool>;
}
