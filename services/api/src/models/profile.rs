//! Profile model, upsert payloads and the partial-update rules

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::user::UserSummary;

/// Social network links of a profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Social {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

impl Social {
    /// Overwrite the links set in `other`, keep the rest
    pub fn merge(&mut self, other: &Social) {
        merge_field(&mut self.youtube, &other.youtube);
        merge_field(&mut self.twitter, &other.twitter);
        merge_field(&mut self.facebook, &other.facebook);
        merge_field(&mut self.linkedin, &other.linkedin);
        merge_field(&mut self.instagram, &other.instagram);
    }
}

/// Profile entity, one per user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub id: Uuid,
    #[sqlx(rename = "user_id")]
    pub user: Uuid,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub status: String,
    pub githubusername: Option<String>,
    pub skills: Vec<String>,
    #[sqlx(json)]
    pub social: Social,
    pub date: DateTime<Utc>,
}

/// Profile with its owner populated, as returned by `GET /api/profile/me`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub user: UserSummary,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub status: String,
    pub githubusername: Option<String>,
    pub skills: Vec<String>,
    pub social: Social,
    pub date: DateTime<Utc>,
}

impl ProfileResponse {
    pub fn new(profile: Profile, user: UserSummary) -> Self {
        Self {
            id: profile.id,
            user,
            company: profile.company,
            website: profile.website,
            location: profile.location,
            bio: profile.bio,
            status: profile.status,
            githubusername: profile.githubusername,
            skills: profile.skills,
            social: profile.social,
            date: profile.date,
        }
    }
}

/// Body of `POST /api/profile`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProfileRequest {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub status: Option<String>,
    pub githubusername: Option<String>,
    /// Comma separated list, e.g. `"rust, go"`
    pub skills: Option<String>,
    pub youtube: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
}

/// The fields a profile upsert writes
///
/// `None` means "leave the stored value alone".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub status: Option<String>,
    pub githubusername: Option<String>,
    pub skills: Option<Vec<String>>,
    pub social: Social,
}

impl From<ProfileRequest> for ProfileUpdate {
    fn from(request: ProfileRequest) -> Self {
        Self {
            company: present(request.company),
            website: present(request.website),
            location: present(request.location),
            bio: present(request.bio),
            status: present(request.status),
            githubusername: present(request.githubusername),
            skills: present(request.skills).map(|skills| split_skills(&skills)),
            social: Social {
                youtube: present(request.youtube),
                twitter: present(request.twitter),
                facebook: present(request.facebook),
                linkedin: present(request.linkedin),
                instagram: present(request.instagram),
            },
        }
    }
}

impl ProfileUpdate {
    /// Apply the present fields onto an existing profile
    pub fn apply(&self, profile: &mut Profile) {
        merge_field(&mut profile.company, &self.company);
        merge_field(&mut profile.website, &self.website);
        merge_field(&mut profile.location, &self.location);
        merge_field(&mut profile.bio, &self.bio);
        merge_field(&mut profile.githubusername, &self.githubusername);
        if let Some(status) = &self.status {
            profile.status = status.clone();
        }
        if let Some(skills) = &self.skills {
            profile.skills = skills.clone();
        }
        profile.social.merge(&self.social);
    }

    /// Build the first profile of `user_id` from this update
    pub fn into_profile(self, user_id: Uuid) -> Profile {
        Profile {
            id: Uuid::new_v4(),
            user: user_id,
            company: self.company,
            website: self.website,
            location: self.location,
            bio: self.bio,
            status: self.status.unwrap_or_default(),
            githubusername: self.githubusername,
            skills: self.skills.unwrap_or_default(),
            social: self.social,
            date: Utc::now(),
        }
    }
}

/// Split a comma separated skills string, trimming each entry
pub fn split_skills(skills: &str) -> Vec<String> {
    skills
        .split(',')
        .map(str::trim)
        .filter(|skill| !skill.is_empty())
        .map(str::to_string)
        .collect()
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn merge_field(target: &mut Option<String>, value: &Option<String>) {
    if let Some(value) = value {
        *target = Some(value.clone());
    }
}
