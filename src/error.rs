//! Veneer error types

/// Veneer error types
#[derive(Debug, thiserror::Error)]
pub enum VeneerError {
    /// A prop value could not be serialized during key derivation.
    ///
    /// This is a caller contract violation (e.g. a non-string-keyed map in
    /// a prop bag) and surfaces at the derivation call site, never from the
    /// cache storage path.
    #[error("key derivation failed: {0}")]
    KeyDerivation(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Result type alias for veneer operations
pub type Result<T> = std::result::Result<T, VeneerError>;
