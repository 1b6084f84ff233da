//! Error types for the nsgate core.

use std::fmt;

use thiserror::Error;

/// Failures surfaced by the primitive and identity codecs.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The underlying reader or writer failed, including short reads.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The identity encoding starts with a tag this codec does not understand.
    #[error("unsupported identity encoding tag: {0:#04x}")]
    UnsupportedIdentityTag(u8),

    /// A string field did not contain valid UTF-8.
    #[error("invalid utf-8 in string field")]
    InvalidUtf8,

    /// A hex string could not be parsed.
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// A key had the wrong number of bytes.
    #[error("invalid key length: expected {expected}, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },

    /// A length does not fit in the 32-bit prefix.
    #[error("length {0} exceeds u32 prefix")]
    LengthOverflow(usize),
}

impl CodecError {
    /// True when the failure was caused by the input ending early.
    pub fn is_unexpected_eof(&self) -> bool {
        matches!(self, CodecError::Io(e) if e.kind() == std::io::ErrorKind::UnexpectedEof)
    }
}

/// The wire field a decode failure occurred at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Identity,
    NamespaceCount,
    Namespace,
    RecordCount,
    Action,
    Cert,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Identity => "identity",
            Field::NamespaceCount => "namespace count",
            Field::Namespace => "namespace",
            Field::RecordCount => "record count",
            Field::Action => "action",
            Field::Cert => "cert",
        };
        f.write_str(name)
    }
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
