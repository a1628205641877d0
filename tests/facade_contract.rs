//! Facade contract tests against the always-available null driver.
//!
//! These exercise the public surface only: consumers see
//! get/put/forget/remember/generate_key and nothing about driver identity or
//! connectivity internals.

use gateway_cache::{CacheManager, CacheSettings};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

fn manager() -> CacheManager {
    CacheManager::from_settings(CacheSettings {
        driver: "null".to_string(),
        prefix: "storefront_".to_string(),
        redis: None,
    })
}

#[tokio::test]
async fn outage_mode_reads_miss_and_writes_are_unacknowledged() {
    let cache = manager();

    assert!(!cache
        .put("42", &json!({"status": "shipped"}), Some(Duration::from_secs(60)))
        .await
        .unwrap());
    assert_eq!(cache.get("42").await.unwrap(), None);
    assert_eq!(cache.get_many(&["42", "43"]).await.unwrap(), vec![None, None]);
}

#[tokio::test]
async fn invalidation_is_always_a_vacuous_success() {
    let cache = manager();

    assert!(cache.forget(&["42"]).await.unwrap());
    assert!(cache.forget_by_pattern("storefront_*").await.unwrap());
    assert!(cache.flush().await.unwrap());
}

#[tokio::test]
async fn remember_serves_the_producer_every_time() {
    let cache = manager();
    let calls = AtomicUsize::new(0);

    for _ in 0..3 {
        let value = cache
            .remember("42", Some(Duration::from_secs(60)), || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(json!({"status": "shipped"}))
            })
            .await
            .unwrap();
        assert_eq!(value, json!({"status": "shipped"}));
    }

    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn generated_keys_are_stable_and_structural() {
    let cache = manager();

    let a = cache
        .generate_key(&json!({"path": "/catalog/42", "locale": "de_DE"}))
        .unwrap();
    let b = cache
        .generate_key(&json!({"locale": "de_DE", "path": "/catalog/42"}))
        .unwrap();
    assert_eq!(a, b);

    let other = cache
        .generate_key(&json!({"path": "/catalog/43", "locale": "de_DE"}))
        .unwrap();
    assert_ne!(a, other);

    assert_eq!(cache.default_key(), cache.generate_key("").unwrap());
}

#[tokio::test]
async fn prefix_is_observable_through_the_facade() {
    let cache = manager();

    assert_eq!(cache.prefix().await, "storefront_");
    cache.set_prefix("orders_").await;
    assert_eq!(cache.prefix().await, "orders_");
}
