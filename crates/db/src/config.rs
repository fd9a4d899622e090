//! Database connection settings.
//!
//! The connection target comes from, in order of precedence:
//!
//! 1. `DATABASE_URL`
//! 2. `IS_POSTGRES_HOST` / `IS_POSTGRES_PORT` / `IS_POSTGRES_USER` /
//!    `IS_POSTGRES_PASSWORD` / `IS_POSTGRES_DB`
//! 3. the libpq variables `PGHOST` / `PGPORT` / `PGUSER` / `PGPASSWORD` /
//!    `PGDATABASE`
//!
//! Discrete parts are passed to [`PgConnectOptions`] directly, so user names
//! and passwords never need URL escaping.

use std::time::Duration;

use dealwatch_core::config::{non_empty, parse_or, process_env, ConfigError};
use sqlx::postgres::PgConnectOptions;

const DEFAULT_PORT: u16 = 5432;
const DEFAULT_POOL_MIN: u32 = 1;
const DEFAULT_POOL_MAX: u32 = 10;
const DEFAULT_QUERY_TIMEOUT_SECS: f64 = 5.0;

/// Where to connect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseSource {
    Url(String),
    Parts {
        host: String,
        port: u16,
        user: String,
        password: String,
        database: String,
    },
}

/// Connection target, pool bounds, and the per-read-query timeout.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub source: DatabaseSource,
    pub pool_min: u32,
    pub pool_max: u32,
    /// Upper bound on every individual read query issued by the API.
    pub query_timeout: Duration,
}

impl DatabaseConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var            | Default |
    /// |--------------------|---------|
    /// | `DB_POOL_MIN`      | `1`     |
    /// | `DB_POOL_MAX`      | `10`    |
    /// | `DB_QUERY_TIMEOUT` | `5.0`   |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&process_env)
    }

    pub fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let source = resolve_source(lookup)?;

        let pool_min: u32 = parse_or(lookup, "DB_POOL_MIN", DEFAULT_POOL_MIN)?;
        let pool_max: u32 = parse_or(lookup, "DB_POOL_MAX", DEFAULT_POOL_MAX)?;
        if pool_max == 0 || pool_min > pool_max {
            return Err(ConfigError::Invalid {
                key: "DB_POOL_MAX",
                value: format!("{pool_max} (DB_POOL_MIN is {pool_min})"),
            });
        }

        let timeout_secs: f64 = parse_or(lookup, "DB_QUERY_TIMEOUT", DEFAULT_QUERY_TIMEOUT_SECS)?;
        let invalid_timeout = || ConfigError::Invalid {
            key: "DB_QUERY_TIMEOUT",
            value: timeout_secs.to_string(),
        };
        if timeout_secs <= 0.0 {
            return Err(invalid_timeout());
        }
        // NaN, infinity, and values past Duration::MAX all fail here.
        let query_timeout =
            Duration::try_from_secs_f64(timeout_secs).map_err(|_| invalid_timeout())?;

        Ok(Self {
            source,
            pool_min,
            pool_max,
            query_timeout,
        })
    }

    /// Build sqlx connect options for the configured source.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        match &self.source {
            DatabaseSource::Url(url) => normalize_url(url).parse(),
            DatabaseSource::Parts {
                host,
                port,
                user,
                password,
                database,
            } => Ok(PgConnectOptions::new_without_pgpass()
                .host(host)
                .port(*port)
                .username(user)
                .password(password)
                .database(database)),
        }
    }
}

fn resolve_source(lookup: &impl Fn(&str) -> Option<String>) -> Result<DatabaseSource, ConfigError> {
    if let Some(url) = non_empty(lookup, "DATABASE_URL") {
        return Ok(DatabaseSource::Url(url));
    }

    // IS_POSTGRES_PASSWORD must be set but may be empty.
    if let (Some(host), Some(database), Some(user), Some(password)) = (
        non_empty(lookup, "IS_POSTGRES_HOST"),
        non_empty(lookup, "IS_POSTGRES_DB"),
        non_empty(lookup, "IS_POSTGRES_USER"),
        lookup("IS_POSTGRES_PASSWORD"),
    ) {
        return Ok(DatabaseSource::Parts {
            host,
            port: parse_or(lookup, "IS_POSTGRES_PORT", DEFAULT_PORT)?,
            user,
            password,
            database,
        });
    }

    if let (Some(host), Some(user), Some(database)) = (
        non_empty(lookup, "PGHOST"),
        non_empty(lookup, "PGUSER"),
        non_empty(lookup, "PGDATABASE"),
    ) {
        return Ok(DatabaseSource::Parts {
            host,
            port: parse_or(lookup, "PGPORT", DEFAULT_PORT)?,
            user,
            password: lookup("PGPASSWORD").unwrap_or_default(),
            database,
        });
    }

    Err(ConfigError::Missing(
        "no database configured: set DATABASE_URL, IS_POSTGRES_* or PG* variables".to_string(),
    ))
}

/// Strip a SQLAlchemy-style driver suffix (`postgresql+asyncpg://`) so URLs
/// shared with other tooling still parse.
fn normalize_url(url: &str) -> String {
    match url.split_once("://") {
        Some((scheme, rest)) if scheme.contains('+') => {
            let base = scheme.split('+').next().unwrap_or(scheme);
            format!("{base}://{rest}")
        }
        _ => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn database_url_wins() {
        let lookup = lookup_from(&[
            ("DATABASE_URL", "postgres://app:pw@db:5432/deals"),
            ("PGHOST", "ignored"),
            ("PGUSER", "ignored"),
            ("PGDATABASE", "ignored"),
        ]);
        let config = DatabaseConfig::from_lookup(&lookup).unwrap();
        assert_eq!(
            config.source,
            DatabaseSource::Url("postgres://app:pw@db:5432/deals".into())
        );
        assert_eq!(config.pool_min, 1);
        assert_eq!(config.pool_max, 10);
        assert_eq!(config.query_timeout, Duration::from_secs(5));
    }

    #[test]
    fn is_postgres_parts_allow_empty_password() {
        let lookup = lookup_from(&[
            ("IS_POSTGRES_HOST", "pg.internal"),
            ("IS_POSTGRES_DB", "deals"),
            ("IS_POSTGRES_USER", "svc@ops"),
            ("IS_POSTGRES_PASSWORD", ""),
        ]);
        let config = DatabaseConfig::from_lookup(&lookup).unwrap();
        assert_eq!(
            config.source,
            DatabaseSource::Parts {
                host: "pg.internal".into(),
                port: 5432,
                user: "svc@ops".into(),
                password: String::new(),
                database: "deals".into(),
            }
        );
    }

    #[test]
    fn is_postgres_requires_password_variable() {
        let lookup = lookup_from(&[
            ("IS_POSTGRES_HOST", "pg.internal"),
            ("IS_POSTGRES_DB", "deals"),
            ("IS_POSTGRES_USER", "svc"),
            ("PGHOST", "fallback"),
            ("PGUSER", "pguser"),
            ("PGDATABASE", "pgdb"),
            ("PGPORT", "6543"),
        ]);
        let config = DatabaseConfig::from_lookup(&lookup).unwrap();
        assert_eq!(
            config.source,
            DatabaseSource::Parts {
                host: "fallback".into(),
                port: 6543,
                user: "pguser".into(),
                password: String::new(),
                database: "pgdb".into(),
            }
        );
    }

    #[test]
    fn missing_source_is_an_error() {
        let lookup = lookup_from(&[("PGHOST", "only-host")]);
        assert!(matches!(
            DatabaseConfig::from_lookup(&lookup),
            Err(ConfigError::Missing(_))
        ));
    }

    #[test]
    fn pool_bounds_are_checked() {
        let lookup = lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/deals"),
            ("DB_POOL_MIN", "5"),
            ("DB_POOL_MAX", "2"),
        ]);
        assert!(matches!(
            DatabaseConfig::from_lookup(&lookup),
            Err(ConfigError::Invalid { key: "DB_POOL_MAX", .. })
        ));
    }

    #[test]
    fn fractional_query_timeout_is_supported() {
        let lookup = lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/deals"),
            ("DB_QUERY_TIMEOUT", "0.25"),
        ]);
        let config = DatabaseConfig::from_lookup(&lookup).unwrap();
        assert_eq!(config.query_timeout, Duration::from_millis(250));
    }

    #[test]
    fn non_positive_query_timeout_is_rejected() {
        let lookup = lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/deals"),
            ("DB_QUERY_TIMEOUT", "0"),
        ]);
        assert!(DatabaseConfig::from_lookup(&lookup).is_err());
    }

    #[test]
    fn oversized_query_timeout_is_rejected() {
        for raw in ["1e30", "inf", "NaN"] {
            let lookup = lookup_from(&[
                ("DATABASE_URL", "postgres://localhost/deals"),
                ("DB_QUERY_TIMEOUT", raw),
            ]);
            assert!(
                matches!(
                    DatabaseConfig::from_lookup(&lookup),
                    Err(ConfigError::Invalid { key: "DB_QUERY_TIMEOUT", .. })
                ),
                "{raw}"
            );
        }
    }

    #[test]
    fn driver_suffix_is_stripped() {
        assert_eq!(
            normalize_url("postgresql+asyncpg://u:p@h:5432/db"),
            "postgresql://u:p@h:5432/db"
        );
        assert_eq!(normalize_url("postgres://h/db"), "postgres://h/db");
    }

    #[test]
    fn parts_become_connect_options() {
        let config = DatabaseConfig {
            source: DatabaseSource::Parts {
                host: "pg.internal".into(),
                port: 6543,
                user: "svc@ops".into(),
                password: "p@ss/word".into(),
                database: "deals".into(),
            },
            pool_min: 1,
            pool_max: 10,
            query_timeout: Duration::from_secs(5),
        };
        let options = config.connect_options().unwrap();
        assert_eq!(options.get_host(), "pg.internal");
        assert_eq!(options.get_port(), 6543);
        assert_eq!(options.get_username(), "svc@ops");
        assert_eq!(options.get_database(), Some("deals"));
    }

    #[test]
    fn url_with_driver_suffix_parses() {
        let config = DatabaseConfig {
            source: DatabaseSource::Url("postgresql+asyncpg://app:pw@db:5433/deals".into()),
            pool_min: 1,
            pool_max: 10,
            query_timeout: Duration::from_secs(5),
        };
        let options = config.connect_options().unwrap();
        assert_eq!(options.get_host(), "db");
        assert_eq!(options.get_port(), 5433);
        assert_eq!(options.get_database(), Some("deals"));
    }
}
