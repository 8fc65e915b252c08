//! Advisory counters for global-tier traffic.
//!
//! [`CacheMetrics`] keeps process-local counters behind the facade and
//! mirrors each recording into the `metrics` crate under the names in
//! [`telemetry`](crate::telemetry). Counters advance only when
//! instrumentation was enabled at build time; they reset only by explicit
//! call and never influence cache behavior.

use crate::telemetry;

/// Point-in-time view of the cache counters.
///
/// `size` is the global tier's current entry count at snapshot time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSnapshot {
    /// Global-tier hits since the last reset.
    pub hits: u64,
    /// Global-tier misses since the last reset.
    pub misses: u64,
    /// Entries removed from the global tier by eviction or expiry.
    pub evictions: u64,
    /// Current global-tier entry count.
    pub size: usize,
}

#[derive(Debug)]
pub(crate) struct CacheMetrics {
    enabled: bool,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl CacheMetrics {
    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            enabled,
            hits: 0,
            misses: 0,
            evictions: 0,
        }
    }

    pub(crate) fn record_hit(&mut self) {
        if !self.enabled {
            return;
        }
        self.hits += 1;
        metrics::counter!(telemetry::STYLE_CACHE_HITS_TOTAL).increment(1);
    }

    pub(crate) fn record_miss(&mut self) {
        if !self.enabled {
            return;
        }
        self.misses += 1;
        metrics::counter!(telemetry::STYLE_CACHE_MISSES_TOTAL).increment(1);
    }

    pub(crate) fn record_evictions(&mut self, n: usize) {
        if !self.enabled || n == 0 {
            return;
        }
        self.evictions += n as u64;
        metrics::counter!(telemetry::STYLE_CACHE_EVICTIONS_TOTAL).increment(n as u64);
    }

    pub(crate) fn snapshot(&self, size: usize) -> MetricsSnapshot {
        MetricsSnapshot {
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
            size,
        }
    }

    pub(crate) fn reset(&mut self) {
        self.hits = 0;
        self.misses = 0;
        self.evictions = 0;
    }
}
