//! Redis cache driver
//!
//! Uses `redis::aio::ConnectionManager` for async multiplexed connections.
//! Every read/write/delete qualifies the logical key with the client's prefix;
//! pattern deletion SCANs the raw glob against the global key space. Requires
//! the `cache-redis` feature flag.

use crate::cache::connectivity::{ConnectionHealth, ConnectivityEvent};
use crate::cache::errors::{CacheError, CacheResult};
use crate::cache::traits::{CacheClient, CacheValue};
use crate::config::RedisSettings;
use crate::metrics;
use opentelemetry::KeyValue;
use parking_lot::RwLock;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Redis-backed cache client.
///
/// Cloning shares the connection, prefix and connectivity state; the facade
/// registry holds one instance per driver kind and hands out clones.
#[derive(Clone)]
pub struct RedisCacheClient {
    connection: redis::aio::ConnectionManager,
    prefix: Arc<RwLock<String>>,
    health: ConnectionHealth,
}

impl std::fmt::Debug for RedisCacheClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheClient")
            .field("connection", &"ConnectionManager")
            .field("prefix", &self.prefix.read().as_str())
            .field("state", &self.health.state())
            .finish()
    }
}

impl RedisCacheClient {
    /// Open a connection from settings and adopt the given initial prefix.
    ///
    /// Connection setup is bounded by the configured connect timeout; both a
    /// refused connection and an elapsed bound surface as errors so the
    /// facade can fall back.
    pub async fn connect(settings: &RedisSettings, prefix: &str) -> CacheResult<Self> {
        let url = settings.url();
        let client = redis::Client::open(url.as_str()).map_err(|e| {
            CacheError::Connection(format!("Failed to create Redis client: {e}"))
        })?;

        let connection = tokio::time::timeout(
            settings.connection_timeout(),
            redis::aio::ConnectionManager::new(client),
        )
        .await
        .map_err(|_| {
            CacheError::Timeout(format!(
                "Connecting to Redis at {} timed out",
                redact_url(&url)
            ))
        })?
        .map_err(|e| CacheError::Connection(format!("Failed to connect to Redis: {e}")))?;

        let health = ConnectionHealth::new();
        health.apply(ConnectivityEvent::Ready);

        debug!(url = %redact_url(&url), "Redis cache client connected");

        Ok(Self {
            connection,
            prefix: Arc::new(RwLock::new(prefix.to_string())),
            health,
        })
    }

    pub(crate) fn health(&self) -> &ConnectionHealth {
        &self.health
    }

    fn qualified(&self, key: &str) -> String {
        format!("{}{}", self.prefix.read(), key)
    }

    /// Report a backend error: telemetry on every error, closed-state
    /// transition only for the fatal-connectivity class.
    fn backend_error(&self, operation: &'static str, err: redis::RedisError) -> CacheError {
        let fatal = is_fatal_redis_error(&err);
        metrics::cache_backend_errors_total().add(
            1,
            &[
                KeyValue::new("operation", operation),
                KeyValue::new("fatal", fatal),
            ],
        );
        warn!(operation = operation, error = %err, fatal = fatal, "Redis cache operation failed");

        if fatal {
            self.health
                .apply(ConnectivityEvent::Fatal(err.to_string()));
            CacheError::ConnectionClosed(format!("Redis {operation} failed: {err}"))
        } else if err.is_timeout() {
            CacheError::Timeout(format!("Redis {operation} timed out: {err}"))
        } else {
            CacheError::Backend(format!("Redis {operation} failed: {err}"))
        }
    }

    fn decode(key: &str, raw: String) -> CacheResult<CacheValue> {
        serde_json::from_str(&raw).map_err(|e| {
            CacheError::Serialization(format!("stored payload under {key} is not valid JSON: {e}"))
        })
    }

    fn encode(value: &CacheValue) -> CacheResult<String> {
        serde_json::to_string(value)
            .map_err(|e| CacheError::Serialization(format!("cache payload: {e}")))
    }
}

impl CacheClient for RedisCacheClient {
    fn is_closed(&self) -> bool {
        self.health.is_closed()
    }

    fn prefix(&self) -> String {
        self.prefix.read().clone()
    }

    fn set_prefix(&self, prefix: &str) {
        *self.prefix.write() = prefix.to_string();
    }

    async fn get(&self, key: &str) -> CacheResult<Option<CacheValue>> {
        let mut conn = self.connection.clone();
        let qualified = self.qualified(key);

        let raw: Option<String> = redis::cmd("GET")
            .arg(&qualified)
            .query_async(&mut conn)
            .await
            .map_err(|e| self.backend_error("GET", e))?;

        if raw.is_some() {
            debug!(key = %qualified, "Cache HIT");
        } else {
            debug!(key = %qualified, "Cache MISS");
        }

        raw.map(|r| Self::decode(&qualified, r)).transpose()
    }

    async fn get_many(&self, keys: &[&str]) -> CacheResult<Vec<Option<CacheValue>>> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.connection.clone();
        let qualified: Vec<String> = keys.iter().map(|k| self.qualified(k)).collect();

        let raw: Vec<Option<String>> = redis::cmd("MGET")
            .arg(&qualified)
            .query_async(&mut conn)
            .await
            .map_err(|e| self.backend_error("MGET", e))?;

        raw.into_iter()
            .zip(qualified.iter())
            .map(|(entry, key)| entry.map(|r| Self::decode(key, r)).transpose())
            .collect()
    }

    async fn put(
        &self,
        key: &str,
        value: &CacheValue,
        ttl: Option<Duration>,
    ) -> CacheResult<bool> {
        let mut conn = self.connection.clone();
        let qualified = self.qualified(key);
        let payload = Self::encode(value)?;

        let mut cmd = redis::cmd("SET");
        cmd.arg(&qualified).arg(payload);
        if let Some(ttl) = ttl {
            cmd.arg("EX").arg(ttl.as_secs().max(1));
        }

        cmd.query_async::<()>(&mut conn)
            .await
            .map_err(|e| self.backend_error("SET", e))?;

        debug!(key = %qualified, ttl_seconds = ttl.map(|t| t.as_secs()), "Cache SET");
        Ok(true)
    }

    async fn put_many(
        &self,
        pairs: &[(String, CacheValue)],
        ttl: Option<Duration>,
    ) -> CacheResult<bool> {
        if pairs.is_empty() {
            return Ok(true);
        }

        let mut conn = self.connection.clone();

        let mut pipe = redis::pipe();
        pipe.atomic();
        for (key, value) in pairs {
            let qualified = self.qualified(key);
            let payload = Self::encode(value)?;
            let cmd = pipe.cmd("SET").arg(&qualified).arg(payload);
            if let Some(ttl) = ttl {
                cmd.arg("EX").arg(ttl.as_secs().max(1));
            }
            cmd.ignore();
        }

        pipe.query_async::<()>(&mut conn)
            .await
            .map_err(|e| self.backend_error("SET (batch)", e))?;

        debug!(
            pairs = pairs.len(),
            ttl_seconds = ttl.map(|t| t.as_secs()),
            "Cache SET (batch)"
        );
        Ok(true)
    }

    async fn forget(&self, keys: &[&str]) -> CacheResult<bool> {
        if keys.is_empty() {
            return Ok(false);
        }

        let mut conn = self.connection.clone();
        let qualified: Vec<String> = keys.iter().map(|k| self.qualified(k)).collect();

        let removed: u64 = redis::cmd("DEL")
            .arg(&qualified)
            .query_async(&mut conn)
            .await
            .map_err(|e| self.backend_error("DEL", e))?;

        debug!(keys = keys.len(), removed = removed, "Cache DEL");
        Ok(removed > 0)
    }

    async fn forget_by_pattern(&self, pattern: &str) -> CacheResult<bool> {
        let mut conn = self.connection.clone();
        let mut deleted: u64 = 0;
        let mut cursor: u64 = 0;

        // SCAN the raw (unprefixed) glob so one call can invalidate across
        // prefixes; iterate without blocking the server
        loop {
            let (next_cursor, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(100)
                .query_async(&mut conn)
                .await
                .map_err(|e| self.backend_error("SCAN", e))?;

            if !keys.is_empty() {
                let count: u64 = redis::cmd("DEL")
                    .arg(&keys)
                    .query_async(&mut conn)
                    .await
                    .map_err(|e| self.backend_error("DEL (batch)", e))?;
                deleted += count;
            }

            cursor = next_cursor;
            if cursor == 0 {
                break;
            }
        }

        debug!(pattern = pattern, deleted = deleted, "Cache pattern DEL");
        Ok(true)
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
        // Read-or-populate; backend errors surface to the caller, falling
        // back is the facade's responsibility
        if let Some(cached) = self.get(key).await? {
            return Ok(cached);
        }

        let value = producer().await?;
        self.put(key, &value, ttl).await?;
        Ok(value)
    }

    async fn flush(&self) -> CacheResult<bool> {
        let mut conn = self.connection.clone();

        redis::cmd("FLUSHDB")
            .query_async::<()>(&mut conn)
            .await
            .map_err(|e| self.backend_error("FLUSHDB", e))?;

        debug!("Cache FLUSHDB");
        Ok(true)
    }

    async fn health_check(&self) -> CacheResult<bool> {
        let mut conn = self.connection.clone();
        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| self.backend_error("PING", e))?;

        Ok(pong == "PONG")
    }

    fn client_name(&self) -> &'static str {
        "redis"
    }
}

/// Fatal-connectivity classification: only connection refusal and a dropped
/// connection transition a client to the closed state.
fn is_fatal_redis_error(err: &redis::RedisError) -> bool {
    err.is_connection_refusal() || err.is_connection_dropped()
}

/// Redact credentials from a Redis URL for logging
fn redact_url(url: &str) -> String {
    if let Some(at_pos) = url.find('@') {
        if let Some(colon_pos) = url[..at_pos].rfind(':') {
            let prefix = &url[..=colon_pos];
            let suffix = &url[at_pos..];
            return format!("{prefix}***{suffix}");
        }
    }
    url.to_string()
}
