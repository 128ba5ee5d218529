use std::time::Duration;

use forge_core::meal::DEFAULT_UTC_OFFSET_MINUTES;
use forge_db::PoolSettings;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Mess local time as minutes east of UTC (default: `330`, IST).
    pub mess_utc_offset_minutes: i32,
    /// Maximum pooled database connections (default: `20`).
    pub db_max_connections: u32,
    /// Seconds to wait for a pooled connection before failing (default: `5`).
    pub db_acquire_timeout_secs: u64,
    /// JWT verification settings.
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                 |
    /// |---------------------------|-------------------------|
    /// | `HOST`                    | `0.0.0.0`               |
    /// | `PORT`                    | `3000`                  |
    /// | `CORS_ORIGINS`            | `http://localhost:3000` |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                    |
    /// | `MESS_UTC_OFFSET_MINUTES` | `330`                   |
    /// | `DB_MAX_CONNECTIONS`      | `20`                    |
    /// | `DB_ACQUIRE_TIMEOUT_SECS` | `5`                     |
    ///
    /// JWT variables are documented on [`JwtConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let mess_utc_offset_minutes: i32 = std::env::var("MESS_UTC_OFFSET_MINUTES")
            .unwrap_or_else(|_| DEFAULT_UTC_OFFSET_MINUTES.to_string())
            .parse()
            .expect("MESS_UTC_OFFSET_MINUTES must be a valid i32");

        let db_max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "20".into())
            .parse()
            .expect("DB_MAX_CONNECTIONS must be a valid u32");

        let db_acquire_timeout_secs: u64 = std::env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|_| "5".into())
            .parse()
            .expect("DB_ACQUIRE_TIMEOUT_SECS must be a valid u64");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            mess_utc_offset_minutes,
            db_max_connections,
            db_acquire_timeout_secs,
            jwt,
        }
    }

    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_connections: self.db_max_connections,
            acquire_timeout: Duration::from_secs(self.db_acquire_timeout_secs),
        }
    }
}
