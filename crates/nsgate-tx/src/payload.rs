//! The state updater payload: a request to grant or revoke one namespace.
//!
//! ```text
//! Action := LenPrefixed(namespace) Identity U8(action) LenPrefixed(cert)
//! ```
//!
//! The payload only carries the request. Checking the certificate and
//! mutating the registry belong to the ledger executor.

use std::io::{Read, Write};

use bytes::Bytes;
use nsgate_core::codec::{read_u8, read_var_bytes, write_u8, write_var_bytes};
use nsgate_core::{Field, PublicKey};
use serde::{Deserialize, Serialize};

use crate::error::{AtField, Result, TxError};

/// Current payload format version.
pub const STATE_UPDATER_PAYLOAD_VERSION: u8 = 0x00;

/// Whether the payload grants or revokes the namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum UpdaterAction {
    /// Grant write permission.
    Add = 0,
    /// Revoke write permission.
    Sub = 1,
}

impl UpdaterAction {
    /// Wire byte.
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Parse a wire byte.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(UpdaterAction::Add),
            1 => Some(UpdaterAction::Sub),
            _ => None,
        }
    }
}

impl TryFrom<u8> for UpdaterAction {
    type Error = TxError;

    fn try_from(value: u8) -> Result<Self> {
        Self::from_u8(value).ok_or(TxError::UnknownAction(value))
    }
}

/// Payload of a state updater transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateUpdaterPayload {
    /// Target namespace. Raw bytes; not required to be text.
    pub namespace: Bytes,

    /// The identity whose permission changes.
    pub public_key: PublicKey,

    /// Grant or revoke.
    pub action: UpdaterAction,

    /// Opaque proof of authority, checked by the executor's policy.
    pub cert: Bytes,
}

impl StateUpdaterPayload {
    /// Create a payload.
    pub fn new(
        namespace: impl Into<Bytes>,
        public_key: PublicKey,
        action: UpdaterAction,
        cert: impl Into<Bytes>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            public_key,
            action,
            cert: cert.into(),
        }
    }

    /// Create a grant.
    pub fn add(namespace: impl Into<Bytes>, public_key: PublicKey, cert: impl Into<Bytes>) -> Self {
        Self::new(namespace, public_key, UpdaterAction::Add, cert)
    }

    /// Create a revocation.
    pub fn sub(namespace: impl Into<Bytes>, public_key: PublicKey, cert: impl Into<Bytes>) -> Self {
        Self::new(namespace, public_key, UpdaterAction::Sub, cert)
    }

    /// The namespace as text, if it is valid UTF-8.
    pub fn namespace_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.namespace).ok()
    }

    /// Encode the payload.
    pub fn encode<W: Write + ?Sized>(&self, w: &mut W, version: u8) -> Result<()> {
        check_version(version)?;
        write_var_bytes(w, &self.namespace)?;
        self.public_key.encode(w)?;
        write_u8(w, self.action.to_u8())?;
        write_var_bytes(w, &self.cert)?;
        Ok(())
    }

    /// The encoded bytes, as embedded in a transaction.
    pub fn data(&self, version: u8) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        self.encode(&mut buf, version)?;
        Ok(buf)
    }

    /// Length of the encoded payload in bytes.
    pub fn encoded_len(&self) -> usize {
        4 + self.namespace.len() + nsgate_core::identity::ENCODED_LEN + 1 + 4 + self.cert.len()
    }

    /// Decode a payload, fields in strict order.
    pub fn decode<R: Read + ?Sized>(r: &mut R, version: u8) -> Result<Self> {
        check_version(version)?;
        let namespace = read_var_bytes(r).at(Field::Namespace)?;
        let public_key = PublicKey::decode(r).at(Field::Identity)?;
        let action = UpdaterAction::try_from(read_u8(r).at(Field::Action)?)?;
        let cert = read_var_bytes(r).at(Field::Cert)?;
        Ok(Self {
            namespace: namespace.into(),
            public_key,
            action,
            cert: cert.into(),
        })
    }
}

fn check_version(version: u8) -> Result<()> {
    if version > STATE_UPDATER_PAYLOAD_VERSION {
        return Err(TxError::UnsupportedVersion(version));
    }
    Ok(())
}
