//! Cache backend drivers
//!
//! Driver selection is a closed set: adding a backend means adding a
//! `DriverKind` variant and a `CacheDriver` arm, checked at compile time
//! rather than through a stringly-typed registry.

pub mod null;

#[cfg(feature = "cache-redis")]
pub mod redis;

pub use null::NullCacheClient;

#[cfg(feature = "cache-redis")]
pub use redis::RedisCacheClient;

use super::errors::CacheResult;
use super::traits::{CacheClient, CacheValue};
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// The known driver kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DriverKind {
    /// No-op sink; the always-available fallback
    Null,
    /// Networked Redis backend
    #[cfg(feature = "cache-redis")]
    Redis,
}

impl DriverKind {
    /// Map a configured driver name onto a kind.
    ///
    /// Unknown or unset names resolve to the null driver so that a
    /// misconfigured process still serves requests (with cache misses).
    pub fn from_name(name: &str) -> Self {
        match name {
            #[cfg(feature = "cache-redis")]
            "redis" => Self::Redis,
            "null" | "" => Self::Null,
            other => {
                warn!(driver = other, "unknown cache driver name, resolving to null driver");
                Self::Null
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            #[cfg(feature = "cache-redis")]
            Self::Redis => "redis",
        }
    }
}

/// Enum-dispatch handle over the concrete driver clients.
///
/// Clones share the underlying client instance, so the facade registry can
/// hand the same live connection to every caller.
#[derive(Debug, Clone)]
pub enum CacheDriver {
    Null(NullCacheClient),
    #[cfg(feature = "cache-redis")]
    Redis(Box<RedisCacheClient>),
}

impl CacheDriver {
    pub fn kind(&self) -> DriverKind {
        match self {
            Self::Null(_) => DriverKind::Null,
            #[cfg(feature = "cache-redis")]
            Self::Redis(_) => DriverKind::Redis,
        }
    }
}

impl CacheClient for CacheDriver {
    fn is_closed(&self) -> bool {
        match self {
            Self::Null(c) => c.is_closed(),
            #[cfg(feature = "cache-redis")]
            Self::Redis(c) => c.is_closed(),
        }
    }

    fn prefix(&self) -> String {
        match self {
            Self::Null(c) => c.prefix(),
            #[cfg(feature = "cache-redis")]
            Self::Redis(c) => c.prefix(),
        }
    }

    fn set_prefix(&self, prefix: &str) {
        match self {
            Self::Null(c) => c.set_prefix(prefix),
            #[cfg(feature = "cache-redis")]
            Self::Redis(c) => c.set_prefix(prefix),
        }
    }

    async fn get(&self, key: &str) -> CacheResult<Option<CacheValue>> {
        match self {
            Self::Null(c) => c.get(key).await,
            #[cfg(feature = "cache-redis")]
            Self::Redis(c) => c.get(key).await,
        }
    }

    async fn get_many(&self, keys: &[&str]) -> CacheResult<Vec<Option<CacheValue>>> {
        match self {
            Self::Null(c) => c.get_many(keys).await,
            #[cfg(feature = "cache-redis")]
            Self::Redis(c) => c.get_many(keys).await,
        }
    }

    async fn put(
        &self,
        key: &str,
        value: &CacheValue,
        ttl: Option<Duration>,
    ) -> CacheResult<bool> {
        match self {
            Self::Null(c) => c.put(key, value, ttl).await,
            #[cfg(feature = "cache-redis")]
            Self::Redis(c) => c.put(key, value, ttl).await,
        }
    }

    async fn put_many(
        &self,
        pairs: &[(String, CacheValue)],
        ttl: Option<Duration>,
    ) -> CacheResult<bool> {
        match self {
            Self::Null(c) => c.put_many(pairs, ttl).await,
            #[cfg(feature = "cache-redis")]
            Self::Redis(c) => c.put_many(pairs, ttl).await,
        }
    }

    async fn forget(&self, keys: &[&str]) -> CacheResult<bool> {
        match self {
            Self::Null(c) => c.forget(keys).await,
            #[cfg(feature = "cache-redis")]
            Self::Redis(c) => c.forget(keys).await,
        }
    }

    async fn forget_by_pattern(&self, pattern: &str) -> CacheResult<bool> {
        match self {
            Self::Null(c) => c.forget_by_pattern(pattern).await,
            #[cfg(feature = "cache-redis")]
            Self::Redis(c) => c.forget_by_pattern(pattern).await,
        }
    }

    async fn remember<F, Fut>(
        &self,
        key: &str,
        ttl: Option<Duration>,
        producer: F,
    ) -> CacheResult<CacheValue>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = CacheResult<CacheValue>> + Send,
    {
        match self {
            Self::Null(c) => c.remember(key, ttl, producer).await,
            #[cfg(feature = "cache-redis")]
            Self::Redis(c) => c.remember(key, ttl, producer).await,
        }
    }

    async fn flush(&self) -> CacheResult<bool> {
        match self {
            Self::Null(c) => c.flush().await,
            #[cfg(feature = "cache-redis")]
            Self::Redis(c) => c.flush().await,
        }
    }

    async fn health_check(&self) -> CacheResult<bool> {
        match self {
            Self::Null(c) => c.health_check().await,
            #[cfg(feature = "cache-redis")]
            Self::Redis(c) => c.health_check().await,
        }
    }

    fn client_name(&self) -> &'static str {
        match self {
            Self::Null(c) => c.client_name(),
            #[cfg(feature = "cache-redis")]
            Self::Redis(c) => c.client_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_names_resolve() {
        assert_eq!(DriverKind::from_name("null"), DriverKind::Null);
        #[cfg(feature = "cache-redis")]
        assert_eq!(DriverKind::from_name("redis"), DriverKind::Redis);
    }

    #[test]
    fn test_unknown_and_unset_names_resolve_to_null() {
        assert_eq!(DriverKind::from_name(""), DriverKind::Null);
        assert_eq!(DriverKind::from_name("memcached"), DriverKind::Null);
    }

    #[test]
    fn test_kind_round_trips_through_name() {
        assert_eq!(DriverKind::from_name(DriverKind::Null.name()), DriverKind::Null);
        #[cfg(feature = "cache-redis")]
        assert_eq!(
            DriverKind::from_name(DriverKind::Redis.name()),
            DriverKind::Redis
        );
    }
}
