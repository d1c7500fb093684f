//! PostgreSQL profile repository

use async_trait::async_trait;
use chrono::Utc;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::{PgPool, types::Json};
use tracing::info;
use uuid::Uuid;

use super::ProfileRepository;
use crate::models::{Profile, ProfileUpdate};

const PROFILE_COLUMNS: &str = "id, user_id, company, website, location, bio, status, \
                               githubusername, skills, social, date";

/// Profile repository backed by the `profiles` table
#[derive(Clone)]
pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    /// Create a new profile repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn find_by_user(&self, user_id: Uuid) -> DatabaseResult<Option<Profile>> {
        let query = format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE user_id = $1");

        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::Query)
    }

    async fn create(&self, user_id: Uuid, update: &ProfileUpdate) -> DatabaseResult<Profile> {
        info!("Creating profile for user: {}", user_id);

        let query = format!(
            r#"
            INSERT INTO profiles (id, user_id, company, website, location, bio, status,
                                  githubusername, skills, social, date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {PROFILE_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Profile>(&query)
            .bind(Uuid::new_v4())
            .bind(user_id)
            .bind(&update.company)
            .bind(&update.website)
            .bind(&update.location)
            .bind(&update.bio)
            .bind(update.status.clone().unwrap_or_default())
            .bind(&update.githubusername)
            .bind(update.skills.clone().unwrap_or_default())
            .bind(Json(&update.social))
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::from_query)
    }

    async fn update(
        &self,
        user_id: Uuid,
        update: &ProfileUpdate,
    ) -> DatabaseResult<Option<Profile>> {
        info!("Updating profile for user: {}", user_id);

        // Absent fields bind as NULL and keep their stored value; the social
        // object is merged key by key.
        let query = format!(
            r#"
            UPDATE profiles SET
                company = COALESCE($2, company),
                website = COALESCE($3, website),
                location = COALESCE($4, location),
                bio = COALESCE($5, bio),
                status = COALESCE($6, status),
                githubusername = COALESCE($7, githubusername),
                skills = COALESCE($8, skills),
                social = social || $9
            WHERE user_id = $1
            RETURNING {PROFILE_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .bind(&update.company)
            .bind(&update.website)
            .bind(&update.location)
            .bind(&update.bio)
            .bind(&update.status)
            .bind(&update.githubusername)
            .bind(&update.skills)
            .bind(Json(&update.social))
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::Query)
    }
}
