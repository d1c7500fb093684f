//! Common library for the DevConnector backend
//!
//! This crate provides the storage plumbing shared by the services:
//! PostgreSQL connectivity, schema bootstrap and error handling.
//!
//! ```rust,no_run
//! use common::database::{DatabaseConfig, apply_schema, health_check, init_pool};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env()?;
//!     let pool = init_pool(&config).await?;
//!     apply_schema(&pool).await?;
//!     println!("Database health check: {}", health_check(&pool).await?);
//!     Ok(())
//! }
//! ```

pub mod database;
pub mod error;
