//! Application state shared across handlers

use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    jwt::JwtService,
    repositories::{
        MemoryStore, PgPostRepository, PgProfileRepository, PgUserRepository, PostRepository,
        ProfileRepository, UserRepository,
    },
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub user_repository: Arc<dyn UserRepository>,
    pub profile_repository: Arc<dyn ProfileRepository>,
    pub post_repository: Arc<dyn PostRepository>,
    pub jwt_service: JwtService,
}

impl AppState {
    /// State backed by PostgreSQL
    pub fn postgres(pool: PgPool, jwt_service: JwtService) -> Self {
        Self {
            user_repository: Arc::new(PgUserRepository::new(pool.clone())),
            profile_repository: Arc::new(PgProfileRepository::new(pool.clone())),
            post_repository: Arc::new(PgPostRepository::new(pool)),
            jwt_service,
        }
    }

    /// State backed by a fresh in-memory store
    pub fn in_memory(jwt_service: JwtService) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            user_repository: store.clone(),
            profile_repository: store.clone(),
            post_repository: store,
            jwt_service,
        }
    }
}
