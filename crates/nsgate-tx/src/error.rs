//! Error types for transaction payloads.

use nsgate_core::{CodecError, Field};
use thiserror::Error;

/// Errors that can occur encoding or decoding a payload.
#[derive(Debug, Error)]
pub enum TxError {
    /// Malformed or short input at a named field.
    #[error("state updater payload: {field} decode failed: {source}")]
    Decode {
        field: Field,
        #[source]
        source: CodecError,
    },

    /// The action byte was read but is not a known action.
    #[error("state updater payload: unknown action {0}")]
    UnknownAction(u8),

    /// The payload format version is newer than this codec.
    #[error("unsupported payload version: {0}")]
    UnsupportedVersion(u8),

    /// Failure surfaced from the identity or primitive codec while encoding.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
}

impl TxError {
    /// The field a decode failed at, if any.
    pub fn field(&self) -> Option<Field> {
        match self {
            TxError::Decode { field, .. } => Some(*field),
            TxError::UnknownAction(_) => Some(Field::Action),
            _ => None,
        }
    }
}

pub(crate) trait AtField<T> {
    fn at(self, field: Field) -> Result<T>;
}

impl<T> AtField<T> for std::result::Result<T, CodecError> {
    fn at(self, field: Field) -> Result<T> {
        self.map_err(|source| TxError::Decode { field, source })
    }
}

/// Result type for payload operations.
pub type Result<T> = std::result::Result<T, TxError>;
