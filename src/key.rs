//! Style key derivation.
//!
//! Turns a `(component, variant, props)` triple into a stable [`StyleKey`].
//! Prop names are sorted lexicographically before serialization, so the
//! insertion order of a prop bag never affects the key, and each name and
//! value is serialized as JSON, so logically-identical bags always
//! collapse to the same key while distinct bags never do — JSON quoting
//! escapes delimiter characters inside prop names.
//!
//! Theme-qualified keys ([`derive_theme_key`]) additionally carry the two
//! theme discriminators (design language and mode) ahead of the base key —
//! the same `(component, variant, props)` triple can legitimately produce
//! different styles under different themes and must not collide when both
//! land in the same tier.
//!
//! Values must be plain serializable data. A value `serde_json` rejects
//! (e.g. a map with non-string keys) fails the derivation immediately with
//! [`VeneerError::KeyDerivation`](crate::VeneerError::KeyDerivation) rather
//! than silently producing an unstable key.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::Result;

/// Separator between serialized props within a key.
const PROP_DELIMITER: &str = "|";

/// Deterministic string identifying a unique style request.
///
/// Opaque to callers; obtained from [`derive_key`] or [`derive_theme_key`]
/// and passed to [`StyleCache::resolve`](crate::StyleCache::resolve).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StyleKey(String);

impl StyleKey {
    /// The underlying key string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StyleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derive a style key from a component name, variant, and prop bag.
///
/// Two calls with the same (possibly differently-ordered) prop bag produce
/// identical keys; any differing prop value produces a different key.
///
/// # Errors
///
/// Returns [`VeneerError::KeyDerivation`](crate::VeneerError::KeyDerivation)
/// if a prop value cannot be serialized to JSON.
pub fn derive_key<V: Serialize>(
    component: &str,
    variant: &str,
    props: &HashMap<String, V>,
) -> Result<StyleKey> {
    let mut pairs: Vec<(&String, &V)> = props.iter().collect();
    pairs.sort_unstable_by_key(|(name, _)| *name);

    let mut parts = Vec::with_capacity(pairs.len());
    for (name, value) in pairs {
        // The name is serialized too: quoting escapes any delimiter
        // characters a prop name might contain, so distinct bags can
        // never collapse to one key.
        let name = serde_json::to_string(name)?;
        let json = serde_json::to_string(value)?;
        parts.push(format!("{name}:{json}"));
    }

    Ok(StyleKey(format!(
        "{component}-{variant}-{}",
        parts.join(PROP_DELIMITER)
    )))
}

/// Derive a theme-qualified style key.
///
/// Prefixes the design language and mode (the two theme discriminators)
/// ahead of the base key from [`derive_key`].
pub fn derive_theme_key<V: Serialize>(
    design: &str,
    mode: &str,
    component: &str,
    variant: &str,
    props: &HashMap<String, V>,
) -> Result<StyleKey> {
    let base = derive_key(component, variant, props)?;
    Ok(StyleKey(format!("{design}-{mode}-{base}")))
}
