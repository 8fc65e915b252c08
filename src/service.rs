//! The read-through style cache facade.
//!
//! [`StyleCache`] owns three kinds of [`CacheTier`]: one global tier with
//! process-wide lifetime, one tier per live theme, and one tier per live
//! component instance. [`StyleCache::resolve`] probes them most-specific
//! first — component, then theme, then global — and on a full miss runs
//! the caller's compute closure exactly once, storing the result in the
//! most specific tier the caller supplied. Tiers are independent
//! namespaces: a hit is never promoted or demoted across them, and a miss
//! populates exactly one tier.
//!
//! # Construction
//!
//! One explicitly-constructed instance per process is the intent; the
//! explicit handle (rather than an ambient global) keeps `clear_all` /
//! `reset_metrics` available for test isolation.
//!
//! ```rust
//! use std::collections::HashMap;
//! use veneer::{StyleCache, derive_key};
//!
//! # fn main() -> veneer::Result<()> {
//! let cache: StyleCache<String> = StyleCache::new();
//!
//! let mut props = HashMap::new();
//! props.insert("checked".to_string(), true);
//! let key = derive_key("Checkbox", "flat", &props)?;
//!
//! let style = cache.resolve(&key, None, None, || "shadow:0 1px 2px".to_string());
//! # Ok(())
//! # }
//! ```
//!
//! # Concurrency
//!
//! All operations execute synchronously on the rendering thread; interior
//! state lives behind a `RefCell` and no borrow is held while a compute
//! closure runs. A `resolve` re-entered from inside a compute closure is
//! tolerated and simply computes redundantly — concurrent misses on the
//! same key are not suppressed.

use std::cell::RefCell;
use std::collections::HashMap;

use tracing::{debug, trace};

use crate::key::StyleKey;
use crate::metrics::{CacheMetrics, MetricsSnapshot};
use crate::scope::{ComponentId, ThemeId};
use crate::tier::{CacheTier, TierConfig};
use crate::{Result, VeneerError};

/// Builder for configuring a [`StyleCache`].
///
/// Each scope level takes its own [`TierConfig`]; instrumentation is off
/// by default (metrics calls become no-ops).
///
/// ```rust
/// # use veneer::{StyleCache, StyleCacheBuilder, TierConfig};
/// # use std::time::Duration;
/// let cache: StyleCache<String> = StyleCacheBuilder::new()
///     .global_tier(TierConfig::new().max_size(500))
///     .component_tier(TierConfig::new().max_size(32))
///     .instrumentation(true)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct StyleCacheBuilder {
    global: TierConfig,
    theme: TierConfig,
    component: TierConfig,
    instrumentation: bool,
}

impl Default for StyleCacheBuilder {
    fn default() -> Self {
        Self {
            global: TierConfig::default(),
            theme: TierConfig::default(),
            component: TierConfig::default().max_size(64),
            instrumentation: false,
        }
    }
}

impl StyleCacheBuilder {
    /// Create a builder with default tier configurations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the global tier.
    pub fn global_tier(mut self, config: TierConfig) -> Self {
        self.global = config;
        self
    }

    /// Configure every theme-scoped tier.
    pub fn theme_tier(mut self, config: TierConfig) -> Self {
        self.theme = config;
        self
    }

    /// Configure every component-scoped tier.
    pub fn component_tier(mut self, config: TierConfig) -> Self {
        self.component = config;
        self
    }

    /// Enable or disable metrics collection.
    pub fn instrumentation(mut self, enabled: bool) -> Self {
        self.instrumentation = enabled;
        self
    }

    /// Build the cache.
    ///
    /// # Errors
    ///
    /// Returns [`VeneerError::Configuration`] if any tier is configured
    /// with a zero `max_size` or a zero `max_age`.
    pub fn build<V: Clone>(self) -> Result<StyleCache<V>> {
        for (scope, config) in [
            ("global", &self.global),
            ("theme", &self.theme),
            ("component", &self.component),
        ] {
            if config.max_size == 0 {
                return Err(VeneerError::Configuration(format!(
                    "{scope} tier max_size must be at least 1"
                )));
            }
            if config.max_age.is_zero() {
                return Err(VeneerError::Configuration(format!(
                    "{scope} tier max_age must be non-zero"
                )));
            }
        }

        Ok(StyleCache {
            inner: RefCell::new(Inner {
                global: CacheTier::new(self.global),
                themes: HashMap::new(),
                components: HashMap::new(),
                theme_config: self.theme,
                component_config: self.component,
                metrics: CacheMetrics::new(self.instrumentation),
            }),
        })
    }
}

struct Inner<V> {
    global: CacheTier<V>,
    themes: HashMap<ThemeId, CacheTier<V>>,
    components: HashMap<ComponentId, CacheTier<V>>,
    theme_config: TierConfig,
    component_config: TierConfig,
    metrics: CacheMetrics,
}

/// Read-through cache over the three tier scopes.
///
/// Generic over the cached style value type `V` — the cache stores and
/// clones values, never inspects them. See the module docs for probe
/// order and storage rules.
pub struct StyleCache<V> {
    inner: RefCell<Inner<V>>,
}

impl<V: Clone> StyleCache<V> {
    /// Create a cache with default tier configurations and no
    /// instrumentation. Use [`StyleCacheBuilder`] to customize either.
    pub fn new() -> Self {
        Self {
            inner: RefCell::new(Inner {
                global: CacheTier::new(TierConfig::default()),
                themes: HashMap::new(),
                components: HashMap::new(),
                theme_config: TierConfig::default(),
                component_config: TierConfig::default().max_size(64),
                metrics: CacheMetrics::new(false),
            }),
        }
    }

    /// Resolve a style key, computing on a full miss.
    ///
    /// Probes component tier (if `component` is supplied), then theme tier
    /// (if `theme` is supplied), then the global tier; the first hit wins.
    /// On a full miss `compute` runs exactly once and its result is stored
    /// in the most specific tier supplied, then returned.
    ///
    /// Only global-tier traffic is metered: a probe that reaches the
    /// global tier records a hit or miss; hits at scoped tiers are not
    /// counted.
    pub fn resolve<F>(
        &self,
        key: &StyleKey,
        theme: Option<ThemeId>,
        component: Option<ComponentId>,
        compute: F,
    ) -> V
    where
        F: FnOnce() -> V,
    {
        {
            let mut inner = self.inner.borrow_mut();

            if let Some(id) = component
                && let Some(tier) = inner.components.get_mut(&id)
                && let Some(value) = tier.get(key)
            {
                trace!(%key, scope = "component", "style cache hit");
                return value;
            }

            if let Some(id) = theme
                && let Some(tier) = inner.themes.get_mut(&id)
                && let Some(value) = tier.get(key)
            {
                trace!(%key, scope = "theme", "style cache hit");
                return value;
            }

            if let Some(value) = inner.global.get(key) {
                inner.metrics.record_hit();
                trace!(%key, scope = "global", "style cache hit");
                return value;
            }
            inner.metrics.record_miss();
            trace!(%key, "style cache miss");
        }

        // Borrow released: the compute closure may re-enter the cache.
        let value = compute();

        let mut inner = self.inner.borrow_mut();
        match (component, theme) {
            (Some(id), _) => {
                let config = inner.component_config.clone();
                inner
                    .components
                    .entry(id)
                    .or_insert_with(|| CacheTier::new(config))
                    .set(key.clone(), value.clone());
            }
            (None, Some(id)) => {
                let config = inner.theme_config.clone();
                inner
                    .themes
                    .entry(id)
                    .or_insert_with(|| CacheTier::new(config))
                    .set(key.clone(), value.clone());
            }
            (None, None) => {
                let removed = inner.global.set(key.clone(), value.clone());
                inner.metrics.record_evictions(removed);
            }
        }
        value
    }

    /// Run an exhaustive expiry sweep over every tier.
    ///
    /// Intended to be driven periodically by the host's frame scheduler.
    /// Global-tier removals are metered as evictions.
    pub fn sweep(&self) {
        let mut inner = self.inner.borrow_mut();
        let global = inner.global.sweep();
        inner.metrics.record_evictions(global);

        let mut scoped = 0;
        for tier in inner.themes.values_mut() {
            scoped += tier.sweep();
        }
        for tier in inner.components.values_mut() {
            scoped += tier.sweep();
        }
        if global + scoped > 0 {
            debug!(global, scoped, "style cache sweep");
        }
    }

    /// Drop a theme's tier and all of its entries.
    ///
    /// The theme owner calls this on teardown; afterwards the theme's
    /// cached styles are unreachable.
    pub fn dispose_theme(&self, id: ThemeId) {
        if self.inner.borrow_mut().themes.remove(&id).is_some() {
            debug!(?id, "disposed theme tier");
        }
    }

    /// Drop a component instance's tier and all of its entries.
    pub fn dispose_component(&self, id: ComponentId) {
        if self.inner.borrow_mut().components.remove(&id).is_some() {
            debug!(?id, "disposed component tier");
        }
    }

    /// Evict all global-tier entries.
    pub fn clear_global(&self) {
        self.inner.borrow_mut().global.clear();
    }

    /// Evict everything: the global tier and every scoped tier.
    ///
    /// Scoped tiers are dropped entirely, as if every owner had called
    /// dispose. Metrics are left untouched — reset them explicitly via
    /// [`reset_metrics`](Self::reset_metrics).
    pub fn clear_all(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.global.clear();
        inner.themes.clear();
        inner.components.clear();
    }

    /// Point-in-time metrics counters plus the global tier's entry count.
    pub fn metrics(&self) -> MetricsSnapshot {
        let inner = self.inner.borrow();
        inner.metrics.snapshot(inner.global.len())
    }

    /// Zero the metrics counters.
    pub fn reset_metrics(&self) {
        self.inner.borrow_mut().metrics.reset();
    }

    /// Number of live theme-scoped tiers.
    pub fn theme_tier_count(&self) -> usize {
        self.inner.borrow().themes.len()
    }

    /// Number of live component-scoped tiers.
    pub fn component_tier_count(&self) -> usize {
        self.inner.borrow().components.len()
    }
}

impl<V: Clone> Default for StyleCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> std::fmt::Debug for StyleCache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("StyleCache")
            .field("global_entries", &inner.global.len())
            .field("theme_tiers", &inner.themes.len())
            .field("component_tiers", &inner.components.len())
            .finish()
    }
}
