//! Cache client contract

use super::errors::CacheResult;
use std::future::Future;
use std::time::Duration;

/// Cache payloads are opaque JSON values; the cache layer neither interprets
/// nor validates their shape.
pub type CacheValue = serde_json::Value;

/// Contract implemented by every cache backend driver.
///
/// All operations are async and return `CacheResult` for error handling. An
/// absent value is a legal, non-error result (`Ok(None)`), and no method
/// panics past the facade.
pub trait CacheClient: Send + Sync {
    /// True iff this instance's connection is permanently unusable.
    ///
    /// Once closed, an instance is never returned as the active client again;
    /// a fresh instance must be constructed.
    fn is_closed(&self) -> bool;

    /// Current key prefix, prepended to every logical key before it reaches
    /// the backend.
    fn prefix(&self) -> String;

    /// Replace the key prefix for subsequent operations.
    fn set_prefix(&self, prefix: &str);

    /// Get a value by logical key.
    ///
    /// Returns `Ok(Some(value))` on hit, `Ok(None)` on miss.
    fn get(&self, key: &str) -> impl Future<Output = CacheResult<Option<CacheValue>>> + Send;

    /// Get several values at once, in the same order as the input keys.
    fn get_many(
        &self,
        keys: &[&str],
    ) -> impl Future<Output = CacheResult<Vec<Option<CacheValue>>>> + Send;

    /// Store a value under the prefixed key.
    ///
    /// `ttl` of `None` means no expiry, not a default expiry. Resolves `true`
    /// iff the backend acknowledged the write.
    fn put(
        &self,
        key: &str,
        value: &CacheValue,
        ttl: Option<Duration>,
    ) -> impl Future<Output = CacheResult<bool>> + Send;

    /// Store several key/value pairs, atomically where the backend allows it.
    fn put_many(
        &self,
        pairs: &[(String, CacheValue)],
        ttl: Option<Duration>,
    ) -> impl Future<Output = CacheResult<bool>> + Send;

    /// Remove the given keys. Resolves `true` iff at least one of them existed
    /// and was removed.
    fn forget(&self, keys: &[&str]) -> impl Future<Output = CacheResult<bool>> + Send;

    /// Remove every key matching `pattern` (a glob), resolved against the
    /// global key space.
    ///
    /// The pattern is deliberately NOT prefix-qualified, unlike every other
    /// operation: callers wanting prefix-scoped deletion must embed the prefix
    /// in the pattern themselves. This asymmetry allows cross-prefix bulk
    /// invalidation. A vacuous match is success.
    fn forget_by_pattern(&self, pattern: &str)
        -> impl Future<Output = CacheResult<bool>> + Send;

    /// Cache-aside read-or-populate.
    ///
    /// If a value exists under the prefixed key, return it without invoking
    /// `producer`. Otherwise run `producer`, store its result with the given
    /// TTL, and return it. Concurrent calls for the same key are not
    /// deduplicated; each call's read-or-populate sequence is correct on its
    /// own.
    fn remember<F, Fut>(
        &self,
        key: &str,
        ttl: Option<Duration>,
        producer: F,
    ) -> impl Future<Output = CacheResult<CacheValue>> + Send
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = CacheResult<CacheValue>> + Send;

    /// `remember` with no expiry.
    fn remember_forever<F, Fut>(
        &self,
        key: &str,
        producer: F,
    ) -> impl Future<Output = CacheResult<CacheValue>> + Send
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = CacheResult<CacheValue>> + Send,
    {
        self.remember(key, None, producer)
    }

    /// Clear the entire backend namespace this client is connected to (not
    /// scoped to the local prefix).
    fn flush(&self) -> impl Future<Output = CacheResult<bool>> + Send;

    /// Check that the backend is reachable and responding.
    fn health_check(&self) -> impl Future<Output = CacheResult<bool>> + Send;

    /// Name of this driver, for logs and diagnostics.
    fn client_name(&self) -> &'static str;
}
