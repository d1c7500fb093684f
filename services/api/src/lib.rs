//! DevConnector API service
//!
//! Users register and log in for a JWT, keep a profile, and publish posts
//! that others like and comment on. Storage is PostgreSQL in production and
//! an in-memory store for local runs and tests.

pub mod config;
pub mod error;
pub mod extract;
pub mod gravatar;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod validation;

pub use state::AppState;
