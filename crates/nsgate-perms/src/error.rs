//! Error types for the permissions module.

use nsgate_core::{CodecError, Field};
use thiserror::Error;

/// Errors that can occur during permission operations.
#[derive(Debug, Error)]
pub enum PermsError {
    /// Malformed or short input at a named field.
    #[error("decode failed at {field}: {source}")]
    Decode {
        field: Field,
        #[source]
        source: CodecError,
    },

    /// Failure surfaced from the identity or primitive codec while encoding.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// Invalid genesis configuration.
    #[error("invalid genesis config: {0}")]
    Config(String),

    /// Genesis JSON could not be parsed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Genesis file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PermsError {
    /// The field a decode failed at, if this is a decode error.
    pub fn field(&self) -> Option<Field> {
        match self {
            PermsError::Decode { field, .. } => Some(*field),
            _ => None,
        }
    }
}

/// Attach a field name to a codec result.
pub(crate) trait AtField<T> {
    fn at(self, field: Field) -> Result<T>;
}

impl<T> AtField<T> for std::result::Result<T, CodecError> {
    fn at(self, field: Field) -> Result<T> {
        self.map_err(|source| PermsError::Decode { field, source })
    }
}

/// Result type for permission operations.
pub type Result<T> = std::result::Result<T, PermsError>;
