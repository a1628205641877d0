//! # Cache Telemetry
//!
//! OpenTelemetry counters for cache failure telemetry. The crate only emits;
//! the embedding process is responsible for installing a meter provider and
//! exporter. Without one, the global provider is a no-op and emission is
//! free.

use opentelemetry::metrics::{Counter, Meter};
use std::sync::OnceLock;

/// Lazy-initialized meter for cache metrics
static CACHE_METER: OnceLock<Meter> = OnceLock::new();

/// Get or initialize the cache meter
fn meter() -> &'static Meter {
    CACHE_METER.get_or_init(|| opentelemetry::global::meter_provider().meter("gateway-cache"))
}

/// Total number of backend errors reported by cache drivers
///
/// Labels:
/// - operation: GET, MGET, SET, SET (batch), DEL, DEL (batch), SCAN, FLUSHDB, PING
/// - fatal: whether the error belongs to the fatal-connectivity class
pub fn cache_backend_errors_total() -> Counter<u64> {
    meter()
        .u64_counter("cache.backend.errors.total")
        .with_description("Total number of backend errors reported by cache drivers")
        .build()
}

/// Total number of demotions from a closed cache client to the null driver
///
/// Labels:
/// - driver: name of the driver that was demoted
pub fn cache_failovers_total() -> Counter<u64> {
    meter()
        .u64_counter("cache.failovers.total")
        .with_description("Total number of demotions from a closed cache client to the null driver")
        .build()
}
