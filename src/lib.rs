//! Veneer - Tiered style memoization for themeable UI components
//!
//! Derived visual styles (shadow stacks, color blends, border
//! calculations) are expensive to construct and are requested repeatedly
//! with identical inputs — across re-renders of one component and across
//! siblings sharing a theme. Veneer caches them behind a read-through
//! facade with three tier scopes, probed most-specific first:
//!
//! - **component tier** — per component instance, dropped on
//!   [`StyleCache::dispose_component`]
//! - **theme tier** — per live theme, dropped on
//!   [`StyleCache::dispose_theme`]
//! - **global tier** — process-wide lifetime
//!
//! Each tier is an independent namespace bounded by entry count (LRU
//! eviction) and idle age (TTL expiry, swept on the write path so reads
//! stay cheap).
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use veneer::{ComponentId, StyleCache, derive_key};
//!
//! # fn main() -> veneer::Result<()> {
//! let cache: StyleCache<String> = StyleCache::new();
//! let button = ComponentId::next();
//!
//! let mut props = HashMap::new();
//! props.insert("elevation".to_string(), 2);
//! let key = derive_key("Button", "neumorphic", &props)?;
//!
//! // First call computes; repeats return the cached value.
//! let style = cache.resolve(&key, None, Some(button), || {
//!     "box-shadow:2px 2px 4px #0003".to_string()
//! });
//! assert_eq!(style, "box-shadow:2px 2px 4px #0003");
//!
//! // Component teardown releases its tier.
//! cache.dispose_component(button);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod key;
pub mod metrics;
pub mod scope;
pub mod service;
pub mod telemetry;
pub mod tier;

// Re-export main types at crate root
pub use error::{Result, VeneerError};
pub use key::{StyleKey, derive_key, derive_theme_key};
pub use metrics::MetricsSnapshot;
pub use scope::{ComponentId, ThemeId};
pub use service::{StyleCache, StyleCacheBuilder};
pub use tier::{CacheTier, TierConfig, TierStats};
