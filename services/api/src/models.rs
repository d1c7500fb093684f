//! Domain models and request/response payloads

pub mod post;
pub mod profile;
pub mod user;

pub use post::{Comment, Like, NewPost, Post, PostError, TextRequest};
pub use profile::{Profile, ProfileRequest, ProfileResponse, ProfileUpdate, Social};
pub use user::{LoginRequest, NewUser, RegisterRequest, TokenResponse, User, UserSummary};
