//! # Cache Access Layer
//!
//! Pluggable cache layer between application logic and interchangeable
//! backends.
//!
//! ## Architecture
//!
//! ```text
//! CacheManager (facade)
//!   └── registry: one live client per DriverKind
//!         ├── Redis(RedisCacheClient)  <- ConnectionManager-based async Redis
//!         └── Null(NullCacheClient)    <- Always-miss, always-succeed fallback
//! ```
//!
//! ## Design Decisions
//!
//! - **Enum dispatch**: driver kinds are a closed set, no vtable
//! - **Graceful degradation**: a failed or closed Redis client demotes to the
//!   null driver; the next access re-attempts construction
//! - **Explicit connectivity state machine**: fatal transport faults drive a
//!   one-way `Live → Closed` transition published on a watch channel
//! - **SCAN for patterns**: non-blocking key iteration, matched against the
//!   raw unprefixed glob
//!
//! ## Usage
//!
//! ```rust,no_run
//! use gateway_cache::cache::CacheManager;
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let cache = CacheManager::from_env()?;
//!
//! cache.put("42", &json!({"status": "shipped"}), Some(std::time::Duration::from_secs(60))).await?;
//! let order = cache.get("42").await?;
//! # Ok(())
//! # }
//! ```

pub mod connectivity;
pub mod drivers;
pub mod errors;
pub mod key;
pub mod manager;
pub mod traits;

pub use connectivity::{ConnectionHealth, ConnectionState, ConnectivityEvent};
pub use drivers::{CacheDriver, DriverKind, NullCacheClient};
pub use errors::{CacheError, CacheResult};
pub use key::{default_key, generate_key};
pub use manager::CacheManager;
pub use traits::{CacheClient, CacheValue};

#[cfg(feature = "cache-redis")]
pub use drivers::RedisCacheClient;
