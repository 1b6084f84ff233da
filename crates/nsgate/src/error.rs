//! Error types for the executor.

use nsgate_perms::PermsError;
use nsgate_tx::TxError;
use thiserror::Error;

/// Errors that can occur while applying state updater payloads.
#[derive(Debug, Error)]
pub enum ExecutorError {
    /// Registry encode/decode or genesis error.
    #[error("permission error: {0}")]
    Permission(#[from] PermsError),

    /// Payload encode/decode error.
    #[error("payload error: {0}")]
    Payload(#[from] TxError),

    /// The certificate policy refused the payload.
    #[error("rejected: {0}")]
    Rejected(String),

    /// The namespace is empty or not valid UTF-8.
    #[error("invalid namespace: {0}")]
    InvalidNamespace(String),

    /// Bytes remained after the payload was decoded.
    #[error("{0} trailing bytes after payload")]
    TrailingBytes(usize),
}

/// Result type for executor operations.
pub type Result<T> = std::result::Result<T, ExecutorError>;
