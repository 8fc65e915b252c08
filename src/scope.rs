//! Scope identities for theme- and component-level tiers.
//!
//! The cache never reads theme or component contents — it keys scoped
//! tiers on identity alone. [`ThemeId`] and [`ComponentId`] are minted
//! from a process-wide counter; the owning theme/component holds the id
//! and the cache holds nothing that extends the owner's lifetime.
//!
//! Rust has no ambient garbage collector, so the weak association is an
//! explicit ownership contract: the owner calls
//! [`StyleCache::dispose_theme`](crate::StyleCache::dispose_theme) or
//! [`StyleCache::dispose_component`](crate::StyleCache::dispose_component)
//! on teardown, which drops that scope's tier and all of its entries.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SCOPE_ID: AtomicU64 = AtomicU64::new(1);

fn next_id() -> u64 {
    NEXT_SCOPE_ID.fetch_add(1, Ordering::Relaxed)
}

/// Identity of a live theme object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThemeId(u64);

impl ThemeId {
    /// Mint a fresh id. Each call returns a distinct identity.
    pub fn next() -> Self {
        Self(next_id())
    }
}

/// Identity of a live component instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentId(u64);

impl ComponentId {
    /// Mint a fresh id. Each call returns a distinct identity.
    pub fn next() -> Self {
        Self(next_id())
    }
}
