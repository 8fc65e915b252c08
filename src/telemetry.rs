//! Telemetry metric name constants.
//!
//! Centralised metric names for veneer's global-tier traffic. Consumers
//! install their own `metrics` recorder (e.g. prometheus, statsd); without
//! a recorder installed, all metric calls are no-ops.
//!
//! Only the global tier is metered — theme- and component-scoped tiers
//! are too numerous to meter individually without overhead. Metrics are
//! advisory and never influence cache behavior.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `veneer_`. Counters end in `_total`.

/// Total global-tier cache hits.
pub const STYLE_CACHE_HITS_TOTAL: &str = "veneer_style_cache_hits_total";

/// Total global-tier cache misses.
pub const STYLE_CACHE_MISSES_TOTAL: &str = "veneer_style_cache_misses_total";

/// Total entries removed from the global tier by eviction or expiry.
pub const STYLE_CACHE_EVICTIONS_TOTAL: &str = "veneer_style_cache_evictions_total";
