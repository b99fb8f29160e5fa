use thiserror::Error;

/// All errors that can occur in Cachette.
#[derive(Debug, Error)]
pub enum CachetteError {
    // --- Store errors ---
    /// The decrypted bytes are not a valid document. A wrong password,
    /// a corrupted file and a tampered file all end up here.
    #[error("wrong password or corrupted data")]
    DecodeFailure,

    /// No key matched. The payload is the key itself, `<key>(fuzzy)` for
    /// fuzzy lookups or `<regex>(regex)` for pattern deletes.
    #[error("key not found: {0}")]
    KeyNotFound(String),

    #[error("Invalid key pattern: {0}")]
    InvalidPattern(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for Cachette results.
pub type Result<T> = std::result::Result<T, CachetteError>;
