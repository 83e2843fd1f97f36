use std::env;

use thiserror::Error;

/// Errors raised while reading configuration from the environment
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Required environment variable \"{0}\" is missing")]
    MissingVar(&'static str),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Deployment platform, gates destructive admin operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Dev,
    Production,
}

/// Application configuration, constructed once at startup and passed to the
/// components that need it. No global singleton: handlers receive this via
/// shared state so the core stays testable in isolation.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub platform: Platform,
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub polka_key: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let platform = match env::var("PLATFORM").as_deref() {
            Ok("dev") => Platform::Dev,
            _ => Platform::Production,
        };

        let port = match env::var("PORT") {
            Ok(v) => v.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                key: "PORT",
                value: v,
            })?,
            Err(_) => 8080,
        };

        // DB_URL is the documented name; DATABASE_URL also works so that
        // standard sqlx tooling picks up the same value.
        let database_url = env::var("DB_URL")
            .or_else(|_| env::var("DATABASE_URL"))
            .map_err(|_| ConfigError::MissingVar("DB_URL"))?;

        Ok(Self {
            platform,
            port,
            database_url,
            jwt_secret: require("JWT_SECRET")?,
            polka_key: require("POLKA_KEY")?,
        })
    }
}

fn require(key: &'static str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingVar(key))
}
