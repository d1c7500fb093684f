//! Service configuration loaded from environment variables
//!
//! # Environment Variables
//! - `BIND_ADDRESS`: interface to listen on (default: 0.0.0.0)
//! - `PORT`: port to listen on (default: 5000)
//! - `STORAGE`: `postgres` or `memory` (default: postgres)
//! - `JWT_SECRET`: shared secret used to sign tokens (required)
//! - `JWT_EXPIRY`: token lifetime in seconds (default: 360000)

use anyhow::Result;
use config::{Config, Environment};
use serde::Deserialize;

/// Where users, profiles and posts are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

/// API service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub bind_address: String,
    pub port: u16,
    pub storage: StorageBackend,
    #[serde(default)]
    pub jwt_secret: String,
    pub jwt_expiry: u64,
}

impl AppConfig {
    /// Load the configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::load(Environment::default())
    }

    fn load(environment: Environment) -> Result<Self> {
        let config = Config::builder()
            .set_default("bind_address", "0.0.0.0")?
            .set_default("port", 5000)?
            .set_default("storage", "postgres")?
            .set_default("jwt_expiry", 360000)?
            .add_source(environment.try_parsing(true))
            .build()?;

        let app_config: AppConfig = config.try_deserialize()?;

        if app_config.jwt_secret.is_empty() {
            anyhow::bail!("JWT_SECRET environment variable not set");
        }

        Ok(app_config)
    }

    /// Address the HTTP listener binds to
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}
