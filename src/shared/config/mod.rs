//! Application configuration module
//!
//! Provides the configuration consumed by the server binary and the reorder
//! engine. Values come from the process environment (optionally seeded from a
//! `.env` file) and fall back to the defaults below.

use std::time::Duration;
use thiserror::Error;

/// Offset added to every position during the displacement phase of a reorder.
///
/// Must be strictly greater than the largest collection the engine will ever
/// reorder: displaced positions live in `offset + 1 ..= offset + N` and must
/// not overlap the settled range `1 ..= N`.
pub const DEFAULT_DISPLACEMENT_OFFSET: i64 = 1_000_000;

/// Largest accepted displacement offset.
///
/// Any order shorter than the offset then keeps `offset + N` within `i64`.
pub const MAX_DISPLACEMENT_OFFSET: i64 = i64::MAX / 2;

/// Port the server listens on when `SERVER_PORT` is not set
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Upper bound on how long a single reorder transaction may run
pub const DEFAULT_REORDER_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection pool size when `DATABASE_MAX_CONNECTIONS` is not set
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Database URL (`postgres://...` or `sqlite:...`); `None` disables database features
    pub database_url: Option<String>,
    /// Port for the HTTP listener
    pub server_port: u16,
    /// Staging offset used by the reorder engine
    pub displacement_offset: i64,
    /// Deadline for one reorder transaction
    pub reorder_timeout: Duration,
    /// Maximum pooled database connections
    pub max_connections: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            server_port: DEFAULT_SERVER_PORT,
            displacement_offset: DEFAULT_DISPLACEMENT_OFFSET,
            reorder_timeout: DEFAULT_REORDER_TIMEOUT,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from the process environment
    ///
    /// Reads `DATABASE_URL`, `SERVER_PORT`, `DISPLACEMENT_OFFSET`,
    /// `REORDER_TIMEOUT_MS` and `DATABASE_MAX_CONNECTIONS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = AppConfig::builder();

        if let Some(url) = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()) {
            builder = builder.database_url(url);
        }
        if let Some(port) = parse_var::<u16, _>(&lookup, "SERVER_PORT")? {
            builder = builder.server_port(port);
        }
        if let Some(offset) = parse_var::<i64, _>(&lookup, "DISPLACEMENT_OFFSET")? {
            builder = builder.displacement_offset(offset);
        }
        if let Some(millis) = parse_var::<u64, _>(&lookup, "REORDER_TIMEOUT_MS")? {
            builder = builder.reorder_timeout(Duration::from_millis(millis));
        }
        if let Some(max) = parse_var::<u32, _>(&lookup, "DATABASE_MAX_CONNECTIONS")? {
            builder = builder.max_connections(max);
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url) = &self.database_url {
            let supported = ["postgres:", "postgresql:", "sqlite:"];
            if !supported.iter().any(|scheme| url.starts_with(scheme)) {
                return Err(ConfigError::InvalidUrl(url.clone()));
            }
        }
        if self.displacement_offset <= 0 {
            return Err(ConfigError::OutOfRange {
                key: "DISPLACEMENT_OFFSET",
                message: "must be a positive integer".to_string(),
            });
        }
        if self.displacement_offset > MAX_DISPLACEMENT_OFFSET {
            return Err(ConfigError::OutOfRange {
                key: "DISPLACEMENT_OFFSET",
                message: format!("must not exceed {}", MAX_DISPLACEMENT_OFFSET),
            });
        }
        if self.reorder_timeout.is_zero() {
            return Err(ConfigError::OutOfRange {
                key: "REORDER_TIMEOUT_MS",
                message: "must be greater than zero".to_string(),
            });
        }
        if self.max_connections == 0 {
            return Err(ConfigError::OutOfRange {
                key: "DATABASE_MAX_CONNECTIONS",
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_var<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    database_url: Option<String>,
    server_port: Option<u16>,
    displacement_offset: Option<i64>,
    reorder_timeout: Option<Duration>,
    max_connections: Option<u32>,
}

impl AppConfigBuilder {
    /// Set the database URL
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    /// Set the listener port
    pub fn server_port(mut self, port: u16) -> Self {
        self.server_port = Some(port);
        self
    }

    /// Set the displacement offset
    pub fn displacement_offset(mut self, offset: i64) -> Self {
        self.displacement_offset = Some(offset);
        self
    }

    /// Set the reorder deadline
    pub fn reorder_timeout(mut self, timeout: Duration) -> Self {
        self.reorder_timeout = Some(timeout);
        self
    }

    /// Set the pool size
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = Some(max);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let defaults = AppConfig::default();
        let config = AppConfig {
            database_url: self.database_url,
            server_port: self.server_port.unwrap_or(defaults.server_port),
            displacement_offset: self
                .displacement_offset
                .unwrap_or(defaults.displacement_offset),
            reorder_timeout: self.reorder_timeout.unwrap_or(defaults.reorder_timeout),
            max_connections: self.max_connections.unwrap_or(defaults.max_connections),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
    #[error("{key} {message}")]
    OutOfRange { key: &'static str, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.displacement_offset, DEFAULT_DISPLACEMENT_OFFSET);
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_reads_all_keys() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/catalogue"),
            ("SERVER_PORT", "8080"),
            ("DISPLACEMENT_OFFSET", "5000"),
            ("REORDER_TIMEOUT_MS", "250"),
            ("DATABASE_MAX_CONNECTIONS", "4"),
        ]))
        .unwrap();

        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/catalogue"));
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.displacement_offset, 5000);
        assert_eq!(config.reorder_timeout, Duration::from_millis(250));
        assert_eq!(config.max_connections, 4);
    }

    #[test]
    fn test_blank_database_url_is_ignored() {
        let config = AppConfig::from_lookup(lookup_from(&[("DATABASE_URL", "  ")])).unwrap();
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_unparseable_port_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[("SERVER_PORT", "eighty")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: "SERVER_PORT",
                value: "eighty".to_string()
            }
        );
    }

    #[test]
    fn test_non_positive_offset_is_rejected() {
        let err = AppConfig::builder().displacement_offset(0).build().unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { key: "DISPLACEMENT_OFFSET", .. }));
    }

    #[test]
    fn test_offset_near_integer_limit_is_rejected() {
        let err = AppConfig::builder()
            .displacement_offset(i64::MAX)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { key: "DISPLACEMENT_OFFSET", .. }));

        let err = AppConfig::from_lookup(lookup_from(&[(
            "DISPLACEMENT_OFFSET",
            "9223372036854775000",
        )]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { key: "DISPLACEMENT_OFFSET", .. }));

        let config = AppConfig::builder()
            .displacement_offset(MAX_DISPLACEMENT_OFFSET)
            .build()
            .unwrap();
        assert_eq!(config.displacement_offset, MAX_DISPLACEMENT_OFFSET);
    }

    #[test]
    fn test_unsupported_scheme_is_rejected() {
        let err = AppConfig::builder()
            .database_url("mysql://localhost/catalogue")
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::InvalidUrl("mysql://localhost/catalogue".to_string()));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let err = AppConfig::builder()
            .reorder_timeout(Duration::ZERO)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { key: "REORDER_TIMEOUT_MS", .. }));
    }
}
