//! Configuration for the cache layer
//!
//! Settings are read once at process start from the environment and handed to
//! the facade explicitly. Variables use the `CACHE` prefix with `__` for
//! nesting:
//!
//! ```bash
//! export CACHE_DRIVER=redis
//! export CACHE_PREFIX=storefront_
//! export CACHE_REDIS__HOST=redis.internal
//! export CACHE_REDIS__PORT=6379
//! export CACHE_REDIS__DATABASE=2
//! export CACHE_REDIS__PASSWORD=secret
//! ```

pub mod error;

pub use error::ConfigurationError;

use config::{Config, Environment};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Cache layer settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheSettings {
    /// Active driver name (`redis` or `null`); unknown names resolve to the
    /// null driver
    #[serde(default)]
    pub driver: String,

    /// Global key prefix applied when a client is constructed
    #[serde(default)]
    pub prefix: String,

    /// Connection parameters for the remote driver
    #[serde(default)]
    pub redis: Option<RedisSettings>,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            driver: "null".to_string(),
            prefix: String::new(),
            redis: None,
        }
    }
}

impl CacheSettings {
    /// Load settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        let settings = Config::builder()
            .set_default("driver", "null")?
            .set_default("prefix", "")?
            .add_source(Environment::with_prefix("CACHE").separator("__"))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}

/// Connection parameters for the Redis backend
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RedisSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Logical database index
    #[serde(default)]
    pub database: i64,

    /// Optional credential; redacted from logs
    #[serde(default)]
    pub password: Option<String>,

    #[serde(default = "default_connection_timeout")]
    pub connection_timeout_seconds: u64,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    6379
}

fn default_connection_timeout() -> u64 {
    5
}

impl Default for RedisSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database: 0,
            password: None,
            connection_timeout_seconds: default_connection_timeout(),
        }
    }
}

impl RedisSettings {
    /// Connection URL for the backend client.
    pub fn url(&self) -> String {
        match &self.password {
            Some(password) => format!(
                "redis://:{}@{}:{}/{}",
                password, self.host, self.port, self.database
            ),
            None => format!("redis://{}:{}/{}", self.host, self.port, self.database),
        }
    }

    /// Get the connect bound as a Duration
    pub fn connection_timeout(&self) -> Duration {
        Duration::from_secs(self.connection_timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_select_the_null_driver() {
        let settings = CacheSettings::default();
        assert_eq!(settings.driver, "null");
        assert_eq!(settings.prefix, "");
        assert!(settings.redis.is_none());
    }

    #[test]
    fn test_redis_url_without_password() {
        let settings = RedisSettings::default();
        assert_eq!(settings.url(), "redis://localhost:6379/0");
    }

    #[test]
    fn test_redis_url_with_password_and_database() {
        let settings = RedisSettings {
            password: Some("secret".to_string()),
            database: 2,
            ..RedisSettings::default()
        };
        assert_eq!(settings.url(), "redis://:secret@localhost:6379/2");
    }

    #[test]
    fn test_connection_timeout_as_duration() {
        let settings = RedisSettings {
            connection_timeout_seconds: 7,
            ..RedisSettings::default()
        };
        assert_eq!(settings.connection_timeout(), Duration::from_secs(7));
    }
}
