use std::time::Duration;

/// Database configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub idle_timeout: Duration,
    /// How long to wait for a pooled connection.
    pub acquire_timeout: Duration,
    /// Upper bound on every repository round trip.
    pub query_timeout: Duration,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} must be a valid {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

impl DbConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default    |
    /// |---------------------------|------------|
    /// | `DATABASE_URL`            | (required) |
    /// | `DB_MAX_CONNECTIONS`      | `25`       |
    /// | `DB_MIN_CONNECTIONS`      | `0`        |
    /// | `DB_IDLE_TIMEOUT_SECS`    | `900`      |
    /// | `DB_ACQUIRE_TIMEOUT_SECS` | `3`        |
    /// | `DB_QUERY_TIMEOUT_SECS`   | `3`        |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let max_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", 25, "u32")?;
        let min_connections = parse_or(&lookup, "DB_MIN_CONNECTIONS", 0, "u32")?;
        let idle_timeout_secs = parse_or(&lookup, "DB_IDLE_TIMEOUT_SECS", 900, "u64")?;
        let acquire_timeout_secs = parse_or(&lookup, "DB_ACQUIRE_TIMEOUT_SECS", 3, "u64")?;
        let query_timeout_secs = parse_or(&lookup, "DB_QUERY_TIMEOUT_SECS", 3, "u64")?;

        Ok(Self {
            database_url,
            max_connections,
            min_connections,
            idle_timeout: Duration::from_secs(idle_timeout_secs),
            acquire_timeout: Duration::from_secs(acquire_timeout_secs),
            query_timeout: Duration::from_secs(query_timeout_secs),
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError> {
    match lookup(name) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            expected,
            value,
        }),
    }
}
