//! Cache facade
//!
//! `CacheManager` is the single entry point the rest of the system calls
//! through. It owns a registry of lazily-constructed driver clients (at most
//! one live instance per kind), resolves the active client from
//! configuration, and demotes to the null driver when the active instance has
//! entered the closed state. Construction cost (handshake, connection setup)
//! is paid at most once per live connection.
//!
//! The facade is constructed explicitly at process start and passed by handle
//! (it is cheap to clone); there is no process-global instance.

use super::drivers::{CacheDriver, DriverKind, NullCacheClient};
use super::errors::CacheResult;
use super::key;
use super::traits::{CacheClient, CacheValue};
use crate::config::{CacheSettings, ConfigurationError};
use crate::metrics;
use opentelemetry::KeyValue;
use serde::Serialize;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{info, warn};

#[cfg(feature = "cache-redis")]
use super::drivers::RedisCacheClient;
#[cfg(feature = "cache-redis")]
use crate::cache::errors::CacheError;

/// Facade over the interchangeable cache drivers.
#[derive(Debug, Clone)]
pub struct CacheManager {
    settings: CacheSettings,
    registry: Arc<Mutex<HashMap<DriverKind, CacheDriver>>>,
}

impl CacheManager {
    /// Build a facade from explicit settings.
    ///
    /// No connection is opened here; the configured driver is constructed
    /// lazily on first use.
    pub fn from_settings(settings: CacheSettings) -> Self {
        info!(driver = %settings.driver, prefix = %settings.prefix, "cache facade initialized");
        Self {
            settings,
            registry: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Build a facade from process-environment settings.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Ok(Self::from_settings(CacheSettings::from_env()?))
    }

    /// Facade that only ever uses the null driver (explicit opt-out, tests).
    pub fn null() -> Self {
        Self::from_settings(CacheSettings::default())
    }

    /// Resolve the active client.
    ///
    /// 1. Reuse the registry entry for the configured kind, constructing it
    ///    on first use.
    /// 2. If that entry reports closed, evict it and resolve the null driver
    ///    instead, never re-entering the failed kind on this call. The next
    ///    call re-attempts construction from scratch.
    pub(crate) async fn resolve_client(&self) -> CacheDriver {
        let kind = DriverKind::from_name(&self.settings.driver);
        let mut registry = self.registry.lock().await;

        if let Some(client) = registry.get(&kind) {
            if !client.is_closed() {
                return client.clone();
            }
            registry.remove(&kind);
            metrics::cache_failovers_total().add(1, &[KeyValue::new("driver", kind.name())]);
            warn!(
                driver = kind.name(),
                "evicting closed cache client, demoting to null driver"
            );
            return self.null_slot(&mut registry);
        }

        if kind == DriverKind::Null {
            return self.null_slot(&mut registry);
        }

        match self.construct(kind).await {
            Ok(client) => {
                info!(driver = kind.name(), "cache client constructed");
                registry.insert(kind, client.clone());
                client
            }
            Err(e) => {
                warn!(
                    driver = kind.name(),
                    error = %e,
                    "failed to construct cache client, falling back to null driver"
                );
                self.null_slot(&mut registry)
            }
        }
    }

    fn null_slot(&self, registry: &mut HashMap<DriverKind, CacheDriver>) -> CacheDriver {
        registry
            .entry(DriverKind::Null)
            .or_insert_with(|| CacheDriver::Null(NullCacheClient::new(&self.settings.prefix)))
            .clone()
    }

    #[cfg(feature = "cache-redis")]
    async fn construct(&self, kind: DriverKind) -> CacheResult<CacheDriver> {
        match kind {
            DriverKind::Null => Ok(CacheDriver::Null(NullCacheClient::new(
                &self.settings.prefix,
            ))),
            DriverKind::Redis => {
                let redis_settings = self.settings.redis.as_ref().ok_or_else(|| {
                    CacheError::Connection(
                        "redis driver selected but no redis settings present".to_string(),
                    )
                })?;
                let client =
                    RedisCacheClient::connect(redis_settings, &self.settings.prefix).await?;
                Ok(CacheDriver::Redis(Box::new(client)))
            }
        }
    }

    #[cfg(not(feature = "cache-redis"))]
    async fn construct(&self, kind: DriverKind) -> CacheResult<CacheDriver> {
        match kind {
            DriverKind::Null => Ok(CacheDriver::Null(NullCacheClient::new(
                &self.settings.prefix,
            ))),
        }
    }

    /// Name of the driver the next operation would use.
    pub async fn driver_name(&self) -> &'static str {
        self.resolve_client().await.client_name()
    }

    /// Current key prefix of the active client.
    pub async fn prefix(&self) -> String {
        self.resolve_client().await.prefix()
    }

    /// Replace the key prefix on the active client.
    pub async fn set_prefix(&self, prefix: &str) {
        self.resolve_client().await.set_prefix(prefix);
    }

    /// Get a value by logical key; `Ok(None)` is a miss, not an error.
    pub async fn get(&self, key: &str) -> CacheResult<Option<CacheValue>> {
        self.resolve_client().await.get(key).await
    }

    /// Get several values at once, in input order.
    pub async fn get_many(&self, keys: &[&str]) -> CacheResult<Vec<Option<CacheValue>>> {
        self.resolve_client().await.get_many(keys).await
    }

    /// Store a value; `ttl` of `None` means no expiry.
    pub async fn put(
        &self,
        key: &str,
        value: &CacheValue,
        ttl: Option<Duration>,
    ) -> CacheResult<bool> {
        self.resolve_client().await.put(key, value, ttl).await
    }

    /// Store several pairs, atomically where the backend allows it.
    pub async fn put_many(
        &self,
        pairs: &[(String, CacheValue)],
        ttl: Option<Duration>,
    ) -> CacheResult<bool> {
        self.resolve_client().await.put_many(pairs, ttl).await
    }

    /// Remove the given keys; `true` iff at least one existed.
    pub async fn forget(&self, keys: &[&str]) -> CacheResult<bool> {
        self.resolve_client().await.forget(keys).await
    }

    /// Remove every key matching the raw glob in the global key space.
    /// Callers scope deletion by embedding the prefix in the pattern
    /// (`"*"` clears everything).
    pub async fn forget_by_pattern(&self, pattern: &str) -> CacheResult<bool> {
        self.resolve_client().await.forget_by_pattern(pattern).await
    }

    /// Cache-aside read-or-populate with a recovery branch.
    ///
    /// The attempt goes through the active client. If that call fails and the
    /// client has since entered the closed state, the producer runs directly
    /// and its result is the call's success value; a total backend outage
    /// yields misses, not errors. Any other failure propagates.
    pub async fn remember<F, Fut>(
        &self,
        key: &str,
        ttl: Option<Duration>,
        producer: F,
    ) -> CacheResult<CacheValue>
    where
        F: Fn() -> Fut + Send + Sync,
        Fut: Future<Output = CacheResult<CacheValue>> + Send,
    {
        let client = self.resolve_client().await;
        match client.remember(key, ttl, &producer).await {
            Ok(value) => Ok(value),
            Err(err) if client.is_closed() => {
                metrics::cache_failovers_total()
                    .add(1, &[KeyValue::new("driver", client.client_name())]);
                warn!(
                    key = key,
                    error = %err,
                    "cache client closed mid-remember, serving producer result directly"
                );
                producer().await
            }
            Err(err) => Err(err),
        }
    }

    /// `remember` with no expiry.
    pub async fn remember_forever<F, Fut>(&self, key: &str, producer: F) -> CacheResult<CacheValue>
    where
        F: Fn() -> Fut + Send + Sync,
        Fut: Future<Output = CacheResult<CacheValue>> + Send,
    {
        self.remember(key, None, producer).await
    }

    /// Clear the entire backend namespace of the active client.
    pub async fn flush(&self) -> CacheResult<bool> {
        self.resolve_client().await.flush().await
    }

    /// Check that the active backend is reachable and responding.
    pub async fn health_check(&self) -> CacheResult<bool> {
        self.resolve_client().await.health_check().await
    }

    /// Derive a stable, collision-resistant key from a structured source.
    ///
    /// Call sites deriving keys from compound descriptors must use this
    /// rather than hand-built keys so hashing stays consistent everywhere.
    pub fn generate_key<T: Serialize + ?Sized>(&self, source: &T) -> CacheResult<String> {
        key::generate_key(source)
    }

    /// Key for a missing source value.
    pub fn default_key(&self) -> String {
        key::default_key()
    }
}
