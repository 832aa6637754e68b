//! Error types for the tally crate.
//!
//! The core tree is infallible once constructed: `add`, `prune`, and the
//! histogram walk cannot fail, and internal accounting violations are
//! assertion failures rather than recoverable errors. What can go wrong is
//! the embedding surface: textual configuration values and the host plugin
//! protocol handshake.

use thiserror::Error;

/// Errors raised by the embedding surface.
#[derive(Debug, Error)]
pub enum TallyError {
    /// A configuration value could not be parsed as an integer.
    #[error("invalid value {value:?} for configuration key {key:?}")]
    InvalidConfigValue {
        key: &'static str,
        value: String,
    },

    /// The host announced a plugin protocol version this crate does not speak.
    /// Embeddings are expected to report this on stderr and exit with status 1.
    #[error("scanner protocol version mismatch: expected {expected}, got {got}")]
    IncompatibleProtocol { expected: u32, got: u32 },
}

/// Result type alias for tally operations.
pub type Result<T> = std::result::Result<T, TallyError>;
