//! Public-key identities.
//!
//! An identity is an uncompressed curve point: two 32-byte affine
//! coordinates. On the wire it is self-delimiting:
//!
//! ```text
//! Identity := U8(0x04) X[32] Y[32]
//! ```
//!
//! Registry keys are derived from the coordinates alone. Both halves are
//! fixed width, so the concatenated hex never collides across identities.

use std::fmt;
use std::io::{Read, Write};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::codec::{read_u8, write_u8};
use crate::error::{CodecError, Result};

/// Width of one coordinate in bytes.
pub const COORDINATE_LEN: usize = 32;

/// Tag byte for the uncompressed point encoding.
pub const UNCOMPRESSED_TAG: u8 = 0x04;

/// Total encoded length of an identity.
pub const ENCODED_LEN: usize = 1 + 2 * COORDINATE_LEN;

/// A public-key identity with affine coordinates `x` and `y`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PublicKey {
    x: [u8; COORDINATE_LEN],
    y: [u8; COORDINATE_LEN],
}

impl PublicKey {
    /// Create from raw coordinates.
    pub const fn from_coordinates(x: [u8; COORDINATE_LEN], y: [u8; COORDINATE_LEN]) -> Self {
        Self { x, y }
    }

    /// The x coordinate.
    pub const fn x(&self) -> &[u8; COORDINATE_LEN] {
        &self.x
    }

    /// The y coordinate.
    pub const fn y(&self) -> &[u8; COORDINATE_LEN] {
        &self.y
    }

    /// Derive the registry key: hex(x) followed by hex(y), no separator.
    pub fn key_id(&self) -> String {
        let mut id = hex::encode(self.x);
        id.push_str(&hex::encode(self.y));
        id
    }

    /// Write the self-delimited encoding.
    pub fn encode<W: Write + ?Sized>(&self, w: &mut W) -> Result<()> {
        write_u8(w, UNCOMPRESSED_TAG)?;
        w.write_all(&self.x)?;
        w.write_all(&self.y)?;
        Ok(())
    }

    /// Read the self-delimited encoding.
    pub fn decode<R: Read + ?Sized>(r: &mut R) -> Result<Self> {
        let tag = read_u8(r)?;
        if tag != UNCOMPRESSED_TAG {
            return Err(CodecError::UnsupportedIdentityTag(tag));
        }
        let mut x = [0u8; COORDINATE_LEN];
        let mut y = [0u8; COORDINATE_LEN];
        r.read_exact(&mut x)?;
        r.read_exact(&mut y)?;
        Ok(Self { x, y })
    }

    /// The encoded bytes.
    pub fn to_bytes(&self) -> [u8; ENCODED_LEN] {
        let mut out = [0u8; ENCODED_LEN];
        out[0] = UNCOMPRESSED_TAG;
        out[1..1 + COORDINATE_LEN].copy_from_slice(&self.x);
        out[1 + COORDINATE_LEN..].copy_from_slice(&self.y);
        out
    }

    /// Parse from encoded bytes. Trailing bytes are rejected.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != ENCODED_LEN {
            return Err(CodecError::InvalidKeyLength {
                expected: ENCODED_LEN,
                got: bytes.len(),
            });
        }
        let mut slice = bytes;
        Self::decode(&mut slice)
    }

    /// Convert the encoded form to hex.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Parse from the hex of the encoded form.
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s)?;
        Self::from_bytes(&bytes)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", &self.key_id()[..16])
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.key_id()[..16])
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
