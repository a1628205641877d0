//! # Gateway Cache
//!
//! Pluggable cache-access layer that sits between application logic and one
//! of several interchangeable backends: a networked key-value store (Redis)
//! and a no-op fallback.
//!
//! ## Overview
//!
//! Application code calls through the [`cache::CacheManager`] facade; the
//! facade resolves the active driver from configuration, constructs its
//! client lazily (paying connection setup at most once per live connection),
//! and transparently demotes to the null driver when the backend becomes
//! unavailable. Under a total backend outage callers observe cache misses
//! and unacknowledged writes, never errors: availability is prioritized
//! over strict caching guarantees.
//!
//! ## Key Features
//!
//! - **Interchangeable drivers** behind one contract ([`cache::CacheClient`])
//! - **Lazy, idempotent client construction** keyed by driver kind
//! - **Automatic degrade-to-safe-mode** when a connection is permanently lost
//! - **Key-space prefixing** and raw-glob bulk invalidation
//! - **Cache-aside `remember`** that never corrupts application flow when the
//!   backend dies mid-operation
//! - **Deterministic key fingerprinting** for compound structured inputs
//!
//! ## Module Organization
//!
//! - [`cache`] - The contract, the drivers, the facade, key generation
//! - [`config`] - Environment-sourced settings
//! - [`logging`] - Console logging initialization
//! - [`metrics`] - Failure telemetry counters

pub mod cache;
pub mod config;
pub mod logging;
pub mod metrics;

pub use cache::{
    CacheClient, CacheError, CacheManager, CacheResult, CacheValue, DriverKind, NullCacheClient,
};
pub use config::{CacheSettings, ConfigurationError, RedisSettings};

#[cfg(feature = "cache-redis")]
pub use cache::RedisCacheClient;
