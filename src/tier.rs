//! Bounded, time-aware style store.
//!
//! [`CacheTier`] is the single storage building block: a key → entry map
//! bounded by a maximum entry count (LRU eviction) and a maximum idle age
//! (TTL expiry). The facade instantiates one tier per scope — global,
//! per-theme, per-component — and every tier behaves identically.
//!
//! # Expiry
//!
//! The read path is the optimization target and never pays expiry-check
//! cost: `get` on an idle-expired entry can still hit until a cleanup pass
//! runs. Cleanup runs two ways, both write-side:
//!
//! - amortized on `set` — on a fixed fraction of inserts, or when the
//!   configured sweep interval has elapsed since the last pass;
//! - exhaustively via [`CacheTier::sweep`], driven by the host's frame
//!   scheduler through [`StyleCache::sweep`](crate::StyleCache::sweep).
//!
//! The sweep is a pure removal pass with no callbacks, so it can run
//! interleaved with any `get`/`set` in the single-threaded model.
//!
//! # Eviction
//!
//! When an insert would exceed `max_size`, least-recently-accessed entries
//! are removed until one free slot exists, so the tier never exceeds
//! `max_size` after any `set`. Eviction scans linearly for the oldest
//! entry; tiers are small enough that this beats maintaining a separate
//! recency list.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::key::StyleKey;

/// Run an amortized expiry pass on every Nth `set` call.
const EXPIRY_PASS_EVERY: u32 = 16;

/// Configuration for a single cache tier.
///
/// ```rust
/// # use veneer::TierConfig;
/// # use std::time::Duration;
/// let config = TierConfig::new()
///     .max_size(500)
///     .max_age(Duration::from_secs(600));
/// ```
#[derive(Debug, Clone)]
pub struct TierConfig {
    /// Maximum number of entries. Default: 256.
    pub max_size: usize,
    /// Maximum idle duration before an entry becomes eligible for removal.
    /// Default: 5 minutes.
    pub max_age: Duration,
    /// Minimum interval between amortized expiry passes. Default: 60s.
    pub sweep_interval: Duration,
}

impl Default for TierConfig {
    fn default() -> Self {
        Self {
            max_size: 256,
            max_age: Duration::from_secs(300),
            sweep_interval: Duration::from_secs(60),
        }
    }
}

impl TierConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of entries.
    pub fn max_size(mut self, n: usize) -> Self {
        self.max_size = n;
        self
    }

    /// Set the maximum idle age for entries.
    pub fn max_age(mut self, age: Duration) -> Self {
        self.max_age = age;
        self
    }

    /// Set the minimum interval between amortized expiry passes.
    pub fn sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }
}

/// A cached style value with its access bookkeeping.
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    // Diagnostic only; surfaced through Debug output.
    #[allow(dead_code)]
    created_at: Instant,
    last_accessed_at: Instant,
    // Logical access order for LRU. Instants can collide on coarse
    // clocks, which would make eviction order nondeterministic.
    touched: u64,
    hit_count: u64,
}

impl<V> CacheEntry<V> {
    fn new(value: V, now: Instant, touched: u64) -> Self {
        Self {
            value,
            created_at: now,
            last_accessed_at: now,
            touched,
            hit_count: 0,
        }
    }
}

/// Advisory per-tier statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierStats {
    /// Current number of live entries.
    pub entries: usize,
    /// Hit count of the hottest entry, 0 when empty.
    pub hottest: u64,
}

/// A bounded, time-aware `StyleKey` → value store.
///
/// One tier owns its entries exclusively; entries are never shared or
/// promoted between tiers. All operations are total — `get` on an absent
/// key reports `None`, never an error.
#[derive(Debug)]
pub struct CacheTier<V> {
    entries: HashMap<StyleKey, CacheEntry<V>>,
    config: TierConfig,
    touches: u64,
    sets_since_pass: u32,
    last_pass: Instant,
}

// Accessors that never clone a value stay unconstrained so callers like
// `Debug` impls work for any `V`.
impl<V> CacheTier<V> {
    /// Create an empty tier with the given configuration.
    pub fn new(config: TierConfig) -> Self {
        Self {
            entries: HashMap::new(),
            config,
            touches: 0,
            sets_since_pass: 0,
            last_pass: Instant::now(),
        }
    }

    /// Whether a key is currently live, without touching its recency.
    pub fn contains_key(&self, key: &StyleKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Evict all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the tier is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Advisory statistics for diagnostics.
    pub fn stats(&self) -> TierStats {
        TierStats {
            entries: self.entries.len(),
            hottest: self
                .entries
                .values()
                .map(|e| e.hit_count)
                .max()
                .unwrap_or(0),
        }
    }
}

impl<V: Clone> CacheTier<V> {
    /// Look up a cached value.
    ///
    /// A hit refreshes the entry's last-access time and increments its hit
    /// count. Returns `None` on a miss.
    pub fn get(&mut self, key: &StyleKey) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    /// Insert (or overwrite) a value.
    ///
    /// Runs the amortized expiry pass when due, then evicts
    /// least-recently-accessed entries until the insert fits under
    /// `max_size`. Returns the number of entries removed to make room, so
    /// the facade can meter evictions.
    pub fn set(&mut self, key: StyleKey, value: V) -> usize {
        self.set_at(key, value, Instant::now())
    }

    /// Exhaustively remove entries idle longer than `max_age`.
    ///
    /// Returns the number of entries removed. Pure removal pass, no
    /// callbacks.
    pub fn sweep(&mut self) -> usize {
        self.sweep_at(Instant::now())
    }

    fn get_at(&mut self, key: &StyleKey, now: Instant) -> Option<V> {
        self.touches += 1;
        let touched = self.touches;
        let entry = self.entries.get_mut(key)?;
        entry.last_accessed_at = now;
        entry.touched = touched;
        entry.hit_count += 1;
        Some(entry.value.clone())
    }

    fn set_at(&mut self, key: StyleKey, value: V, now: Instant) -> usize {
        let mut removed = 0;

        self.sets_since_pass += 1;
        if self.sets_since_pass >= EXPIRY_PASS_EVERY
            || now.duration_since(self.last_pass) >= self.config.sweep_interval
        {
            removed += self.sweep_at(now);
        }

        // Overwriting a live key never grows the tier, so only a genuinely
        // new key needs room made for it.
        if !self.entries.contains_key(&key) {
            while self.entries.len() >= self.config.max_size {
                match self.oldest_key() {
                    Some(oldest) => {
                        self.entries.remove(&oldest);
                        removed += 1;
                    }
                    None => break,
                }
            }
        }

        self.touches += 1;
        self.entries
            .insert(key, CacheEntry::new(value, now, self.touches));
        removed
    }

    fn sweep_at(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        let max_age = self.config.max_age;
        self.entries
            .retain(|_, entry| now.duration_since(entry.last_accessed_at) <= max_age);
        self.sets_since_pass = 0;
        self.last_pass = now;

        let removed = before - self.entries.len();
        if removed > 0 {
            debug!(removed, remaining = self.entries.len(), "expiry sweep");
        }
        removed
    }

    /// Key of the least-recently-accessed entry.
    fn oldest_key(&self) -> Option<StyleKey> {
        self.entries
            .iter()
            .min_by_key(|(_, entry)| entry.touched)
            .map(|(key, _)| key.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> StyleKey {
        let props: HashMap<String, bool> = HashMap::new();
        crate::derive_key(s, "flat", &props).unwrap()
    }

    fn tiny_tier() -> CacheTier<&'static str> {
        CacheTier::new(TierConfig::new().max_size(2))
    }

    #[test]
    fn expired_entry_removed_by_clock_injected_sweep() {
        let mut tier: CacheTier<&str> =
            CacheTier::new(TierConfig::new().max_age(Duration::from_secs(10)));
        let t0 = Instant::now();
        tier.set_at(key("k1"), "v1", t0);

        // Just inside the idle window: survives.
        assert_eq!(tier.sweep_at(t0 + Duration::from_secs(10)), 0);
        // Just past it: removed.
        assert_eq!(tier.sweep_at(t0 + Duration::from_secs(11)), 1);
        assert!(tier.is_empty());
    }

    #[test]
    fn hit_refreshes_idle_clock() {
        let mut tier: CacheTier<&str> =
            CacheTier::new(TierConfig::new().max_age(Duration::from_secs(10)));
        let t0 = Instant::now();
        tier.set_at(key("k1"), "v1", t0);

        // Access at t0+8 pushes the idle deadline out to t0+18.
        assert!(tier.get_at(&key("k1"), t0 + Duration::from_secs(8)).is_some());
        assert_eq!(tier.sweep_at(t0 + Duration::from_secs(15)), 0);
        assert_eq!(tier.sweep_at(t0 + Duration::from_secs(19)), 1);
    }

    #[test]
    fn amortized_pass_triggers_on_nth_set() {
        let mut tier: CacheTier<&str> = CacheTier::new(
            TierConfig::new()
                .max_size(100)
                .max_age(Duration::from_secs(10))
                .sweep_interval(Duration::from_secs(3600)),
        );
        let t0 = Instant::now();
        tier.set_at(key("stale"), "v", t0);

        // Writes more than max_age later: the counter-triggered pass must
        // fire within EXPIRY_PASS_EVERY sets and drop the stale entry.
        let later = t0 + Duration::from_secs(60);
        for i in 0..EXPIRY_PASS_EVERY {
            tier.set_at(key(&format!("fresh{i}")), "v", later);
        }
        assert!(!tier.contains_key(&key("stale")));
    }

    #[test]
    fn eviction_scenario_three_keys_capacity_two() {
        let mut tier = tiny_tier();
        tier.set(key("k1"), "v1");
        tier.set(key("k2"), "v2");
        let removed = tier.set(key("k3"), "v3");

        assert_eq!(removed, 1);
        assert!(!tier.contains_key(&key("k1")));
        assert!(tier.contains_key(&key("k2")));
        assert!(tier.contains_key(&key("k3")));
    }

    #[test]
    fn read_rescues_entry_from_eviction() {
        let mut tier = tiny_tier();
        let t0 = Instant::now();
        tier.set_at(key("k1"), "v1", t0);
        tier.set_at(key("k2"), "v2", t0 + Duration::from_millis(1));

        // Reading k1 makes k2 the LRU entry.
        tier.get_at(&key("k1"), t0 + Duration::from_millis(2));
        tier.set_at(key("k3"), "v3", t0 + Duration::from_millis(3));

        assert!(tier.contains_key(&key("k1")));
        assert!(!tier.contains_key(&key("k2")));
    }

    #[test]
    fn contains_key_does_not_touch_recency() {
        let mut tier = tiny_tier();
        let t0 = Instant::now();
        tier.set_at(key("k1"), "v1", t0);
        tier.set_at(key("k2"), "v2", t0 + Duration::from_millis(1));

        assert!(tier.contains_key(&key("k1")));
        tier.set_at(key("k3"), "v3", t0 + Duration::from_millis(2));

        // k1 stayed LRU despite the contains_key probe.
        assert!(!tier.contains_key(&key("k1")));
    }

    #[test]
    fn overwrite_does_not_evict() {
        let mut tier = tiny_tier();
        tier.set(key("k1"), "v1");
        tier.set(key("k2"), "v2");
        let removed = tier.set(key("k2"), "v2b");

        assert_eq!(removed, 0);
        assert_eq!(tier.len(), 2);
        assert_eq!(tier.get(&key("k2")), Some("v2b"));
    }

    #[test]
    fn accessors_need_no_clone_bound() {
        struct Opaque;
        let tier: CacheTier<Opaque> = CacheTier::new(TierConfig::default());
        assert!(tier.is_empty());
        assert_eq!(tier.len(), 0);
        assert_eq!(tier.stats().entries, 0);
    }

    #[test]
    fn stats_report_hottest_entry() {
        let mut tier = tiny_tier();
        tier.set(key("k1"), "v1");
        tier.set(key("k2"), "v2");
        tier.get(&key("k2"));
        tier.get(&key("k2"));

        let stats = tier.stats();
        assert_eq!(stats.entries, 2);
        assert_eq!(stats.hottest, 2);
    }
}
