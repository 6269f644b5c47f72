//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services. Nothing
//! here reads the process environment directly: callers hand in a lookup function, which keeps
//! request handling free of environment reads and lets tests supply values without mutating
//! process-wide state.

use crate::constants::{
    DEFAULT_ACQUIRE_TIMEOUT_SECS, DEFAULT_IDLE_TIMEOUT_SECS, DEFAULT_MAX_CONNECTIONS,
    DEFAULT_MAX_LIFETIME_SECS, DEFAULT_MIN_CONNECTIONS, DEFAULT_POSTGRES_PORT, DEVELOPMENT_ENV,
};
use crate::{AdminError, AdminResult};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use std::fmt;
use std::time::Duration;

/// Whether missing database settings fall back to local defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunMode {
    Development,
    Production,
}

impl RunMode {
    /// Parse the run mode from an optional `ADMIN_ENV` value.
    ///
    /// Only the exact value `development` (case-insensitive, trimmed) selects development mode.
    pub fn from_env_value(value: Option<String>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case(DEVELOPMENT_ENV) => RunMode::Development,
            _ => RunMode::Production,
        }
    }
}

/// PostgreSQL connection settings.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    user: String,
    password: String,
    host: String,
    port: u16,
    database: String,
}

impl DatabaseConfig {
    /// Resolve database settings from `POSTGRES_*` variables.
    ///
    /// Outside development mode every variable is required; the first missing or blank one is
    /// reported by name. In development mode missing values fall back to a local server.
    ///
    /// # Errors
    /// Returns `AdminError::Validation` if a required variable is absent or `POSTGRES_PORT` is
    /// not a valid port number.
    pub fn from_lookup(
        mode: RunMode,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> AdminResult<Self> {
        let get = |key: &str, fallback: &str| -> AdminResult<String> {
            match lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
                Some(value) => Ok(value),
                None if mode == RunMode::Development => Ok(fallback.to_string()),
                None => Err(AdminError::Validation(format!(
                    "{key} must be set outside development mode"
                ))),
            }
        };

        let user = get("POSTGRES_USER", "postgres")?;
        let password = get("POSTGRES_PASSWORD", "postgres")?;
        let host = get("POSTGRES_HOST", "localhost")?;
        let port = get("POSTGRES_PORT", &DEFAULT_POSTGRES_PORT.to_string())?;
        let database = get("POSTGRES_DB", "postgres")?;

        let port = port
            .parse::<u16>()
            .map_err(|_| AdminError::Validation(format!("POSTGRES_PORT is not a port: {port}")))?;

        Ok(Self {
            user,
            password,
            host,
            port,
            database,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    /// Build sqlx connect options without going through a URL, so credentials need no escaping.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .finish()
    }
}

/// Connection pool sizing and recycling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
    pub test_before_acquire: bool,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            min_connections: DEFAULT_MIN_CONNECTIONS,
            acquire_timeout: Duration::from_secs(DEFAULT_ACQUIRE_TIMEOUT_SECS),
            idle_timeout: Duration::from_secs(DEFAULT_IDLE_TIMEOUT_SECS),
            max_lifetime: Duration::from_secs(DEFAULT_MAX_LIFETIME_SECS),
            test_before_acquire: true,
        }
    }
}

impl PoolSettings {
    /// Read `ADMIN_DB_*` overrides, keeping defaults for anything unset.
    ///
    /// # Errors
    /// Returns `AdminError::Validation` for values that are not non-negative integers, or if
    /// `max_connections` is zero or below `min_connections`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AdminResult<Self> {
        fn parse<T: std::str::FromStr>(
            key: &str,
            value: Option<String>,
        ) -> AdminResult<Option<T>> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(|v| {
                    v.parse::<T>().map_err(|_| {
                        AdminError::Validation(format!("{key} must be a non-negative integer"))
                    })
                })
                .transpose()
        }

        let defaults = Self::default();
        let secs = |key: &str, fallback: Duration| -> AdminResult<Duration> {
            Ok(parse::<u64>(key, lookup(key))?
                .map(Duration::from_secs)
                .unwrap_or(fallback))
        };

        let settings = Self {
            max_connections: parse(
                "ADMIN_DB_MAX_CONNECTIONS",
                lookup("ADMIN_DB_MAX_CONNECTIONS"),
            )?
            .unwrap_or(defaults.max_connections),
            min_connections: parse(
                "ADMIN_DB_MIN_CONNECTIONS",
                lookup("ADMIN_DB_MIN_CONNECTIONS"),
            )?
            .unwrap_or(defaults.min_connections),
            acquire_timeout: secs("ADMIN_DB_ACQUIRE_TIMEOUT_SECS", defaults.acquire_timeout)?,
            idle_timeout: secs("ADMIN_DB_IDLE_TIMEOUT_SECS", defaults.idle_timeout)?,
            max_lifetime: secs("ADMIN_DB_MAX_LIFETIME_SECS", defaults.max_lifetime)?,
            test_before_acquire: defaults.test_before_acquire,
        };

        if settings.max_connections == 0 || settings.max_connections < settings.min_connections {
            return Err(AdminError::Validation(
                "ADMIN_DB_MAX_CONNECTIONS must be positive and at least ADMIN_DB_MIN_CONNECTIONS"
                    .into(),
            ));
        }

        Ok(settings)
    }

    pub fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(self.acquire_timeout)
            .idle_timeout(Some(self.idle_timeout))
            .max_lifetime(Some(self.max_lifetime))
            .test_before_acquire(self.test_before_acquire)
    }
}
