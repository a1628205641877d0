//! Null cache driver
//!
//! A backend that never stores anything: reads miss, writes report
//! unacknowledged, removals succeed vacuously, and `remember` simply runs the
//! producer. Every operation is total and error-free, which makes this driver
//! the always-available fallback when the configured backend is unusable.

use crate::cache::errors::CacheResult;
use crate::cache::traits::{CacheClient, CacheValue};
use parking_lot::RwLock;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Cache client that never caches anything.
#[derive(Debug, Clone)]
pub struct NullCacheClient {
    prefix: Arc<RwLock<String>>,
}

impl NullCacheClient {
    /// Create a null client carrying the given key prefix.
    ///
    /// The prefix is held so the prefix contract stays observable, but no
    /// operation ever uses it.
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: Arc::new(RwLock::new(prefix.to_string())),
        }
    }
}

impl Default for NullCacheClient {
    fn default() -> Self {
        Self::new("")
    }
}

impl CacheClient for NullCacheClient {
    fn is_closed(&self) -> bool {
        false
    }

    fn prefix(&self) -> String {
        self.prefix.read().clone()
    }

    fn set_prefix(&self, prefix: &str) {
        *self.prefix.write() = prefix.to_string();
    }

    async fn get(&self, _key: &str) -> CacheResult<Option<CacheValue>> {
        Ok(None)
    }

    async fn get_many(&self, keys: &[&str]) -> CacheResult<Vec<Option<CacheValue>>> {
        // Absent for the whole call: one miss per requested key
        Ok(keys.iter().map(|_| None).collect())
    }

    async fn put(
        &self,
        _key: &str,
        _value: &CacheValue,
        _ttl: Option<Duration>,
    ) -> CacheResult<bool> {
        // Nothing is stored, so the write is never acknowledged
        Ok(false)
    }

    async fn put_many(
        &self,
        _pairs: &[(String, CacheValue)],
        _ttl: Option<Duration>,
    ) -> CacheResult<bool> {
        Ok(false)
    }

    async fn forget(&self, _keys: &[&str]) -> CacheResult<bool> {
        // There is nothing to remove, so removal trivially succeeds
        Ok(true)
    }

    async fn forget_by_pattern(&self, _pattern: &str) -> CacheResult<bool> {
        Ok(true)
    }

    async fn remember<F, Fut>(
        &self,
        _key: &str,
        _ttl: Option<Duration>,
        producer: F,
    ) -> CacheResult<CacheValue>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = CacheResult<CacheValue>> + Send,
    {
        producer().await
    }

    async fn flush(&self) -> CacheResult<bool> {
        Ok(true)
    }

    async fn health_check(&self) -> CacheResult<bool> {
        Ok(true)
    }

    fn client_name(&self) -> &'static str {
        "null"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_always_misses() {
        let client = NullCacheClient::default();
        assert_eq!(client.get("any_key").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_many_misses_per_key() {
        let client = NullCacheClient::default();
        let values = client.get_many(&["a", "b", "c"]).await.unwrap();
        assert_eq!(values, vec![None, None, None]);
    }

    #[tokio::test]
    async fn test_put_is_not_acknowledged() {
        let client = NullCacheClient::default();
        let stored = client
            .put("key", &json!({"status": "shipped"}), Some(Duration::from_secs(60)))
            .await
            .unwrap();
        assert!(!stored);
    }

    #[tokio::test]
    async fn test_put_many_is_not_acknowledged() {
        let client = NullCacheClient::default();
        let pairs = vec![("a".to_string(), json!(1)), ("b".to_string(), json!(2))];
        assert!(!client.put_many(&pairs, None).await.unwrap());
    }

    #[tokio::test]
    async fn test_removals_succeed_vacuously() {
        let client = NullCacheClient::default();
        assert!(client.forget(&["missing"]).await.unwrap());
        assert!(client.forget_by_pattern("orders_*").await.unwrap());
        assert!(client.flush().await.unwrap());
    }

    #[tokio::test]
    async fn test_remember_runs_producer_without_storing() {
        let client = NullCacheClient::default();
        let value = client
            .remember("orders_42", Some(Duration::from_secs(60)), || async {
                Ok(json!({"status": "shipped"}))
            })
            .await
            .unwrap();
        assert_eq!(value, json!({"status": "shipped"}));

        // Same instance, same key: still a miss
        assert_eq!(client.get("orders_42").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_remember_forever_runs_producer() {
        let client = NullCacheClient::default();
        let value = client
            .remember_forever("k", || async { Ok(json!(7)) })
            .await
            .unwrap();
        assert_eq!(value, json!(7));
    }

    #[tokio::test]
    async fn test_never_closed_and_named() {
        let client = NullCacheClient::default();
        assert!(!client.is_closed());
        assert!(client.health_check().await.unwrap());
        assert_eq!(client.client_name(), "null");
    }

    #[test]
    fn test_prefix_round_trip() {
        let client = NullCacheClient::new("app_");
        assert_eq!(client.prefix(), "app_");
        client.set_prefix("orders_");
        assert_eq!(client.prefix(), "orders_");
    }
}
