use axum::http::HeaderValue;
use dealwatch_core::config::{non_empty, parse_or, process_env, split_list, ConfigError};
use dealwatch_db::DatabaseConfig;
use dealwatch_events::{DispatchConfig, VapidConfig};

const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

/// Server configuration loaded from environment variables.
///
/// All HTTP settings have defaults suitable for local development. The
/// database section has no default target; see [`DatabaseConfig`].
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Upper bound on waiting for the dispatcher to stop (default: `30`).
    pub shutdown_timeout_secs: u64,
    pub database: DatabaseConfig,
    pub dispatch: DispatchConfig,
    pub vapid: VapidConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                          |
    /// |------------------------|--------------------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                                        |
    /// | `PORT`                 | `8000`                                           |
    /// | `CORS_ORIGINS`         | `http://localhost:3000,http://127.0.0.1:3000`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                             |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                                             |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&process_env)
    }

    pub fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = non_empty(lookup, "HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = parse_or(lookup, "PORT", 8000)?;

        let raw_origins =
            non_empty(lookup, "CORS_ORIGINS").unwrap_or_else(|| DEFAULT_CORS_ORIGINS.into());
        let cors_origins = split_list(&raw_origins);
        // Reject origins the CORS layer could not use instead of dropping them.
        if let Some(bad) = cors_origins
            .iter()
            .find(|o| o.parse::<HeaderValue>().is_err())
        {
            return Err(ConfigError::Invalid {
                key: "CORS_ORIGINS",
                value: bad.clone(),
            });
        }

        let request_timeout_secs: u64 = parse_or(lookup, "REQUEST_TIMEOUT_SECS", 30)?;
        let shutdown_timeout_secs: u64 = parse_or(lookup, "SHUTDOWN_TIMEOUT_SECS", 30)?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            database: DatabaseConfig::from_lookup(lookup)?,
            dispatch: DispatchConfig::from_lookup(lookup)?,
            vapid: VapidConfig::from_lookup(lookup)?,
        })
    }
}
