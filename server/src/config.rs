//! Server configuration from environment variables.

use std::env;
use std::net::SocketAddr;
use thiserror::Error;

/// Default address the HTTP listener binds to.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Default password for the built-in `user` and `admin` accounts.
pub const DEFAULT_PASSWORD: &str = "password";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// Password for the `user` account (role USER).
    pub user_password: String,
    /// Password for the `admin` account (roles USER and ADMIN).
    pub admin_password: String,
    /// Use cheap argon2 parameters. Dev/test only.
    pub insecure_password_hashing: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `DATABASE_URL`: Postgres connection string
    ///
    /// Optional:
    /// - `BIND_ADDR`: listen address (default: "0.0.0.0:3000")
    /// - `RECIPE_USER_PASSWORD`: password for `user` (default: "password")
    /// - `RECIPE_ADMIN_PASSWORD`: password for `admin` (default: "password")
    /// - `INSECURE_PASSWORD_HASHING`: set to anything to use fast hashing
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?;

        let bind_addr_raw =
            env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr_raw
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                name: "BIND_ADDR".to_string(),
                value: bind_addr_raw.clone(),
            })?;

        let user_password = password_from_env("RECIPE_USER_PASSWORD");
        let admin_password = password_from_env("RECIPE_ADMIN_PASSWORD");

        let insecure_password_hashing = env::var("INSECURE_PASSWORD_HASHING").is_ok();

        Ok(Self {
            database_url,
            bind_addr,
            user_password,
            admin_password,
            insecure_password_hashing,
        })
    }
}

fn password_from_env(name: &str) -> String {
    env::var(name).unwrap_or_else(|_| {
        tracing::warn!("{} not set, using the default password", name);
        DEFAULT_PASSWORD.to_string()
    })
}
