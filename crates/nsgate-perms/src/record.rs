//! Per-identity namespace records.
//!
//! A record holds the set of namespaces one identity may write to. The set
//! is guarded by its own lock, independent of the registry index, so
//! records for different identities never contend.

use std::collections::HashSet;
use std::io::{Read, Write};

use nsgate_core::codec::{prealloc, read_u32, read_var_string, write_len, write_var_string};
use nsgate_core::{Field, PublicKey};
use parking_lot::RwLock;

use crate::error::{AtField, Result};

/// One identity's set of granted namespaces.
///
/// Wire layout:
///
/// ```text
/// Record := Identity U32(count) count × LenPrefixed(namespace)
/// ```
#[derive(Debug)]
pub struct NamespaceRecord {
    identity: PublicKey,
    namespaces: RwLock<HashSet<String>>,
}

impl NamespaceRecord {
    /// Create a record. Empty names are dropped and duplicates collapse.
    pub fn new<I, S>(identity: PublicKey, namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set = namespaces
            .into_iter()
            .map(Into::into)
            .filter(|ns: &String| !ns.is_empty())
            .collect();
        Self {
            identity,
            namespaces: RwLock::new(set),
        }
    }

    /// The identity this record belongs to.
    pub fn identity(&self) -> &PublicKey {
        &self.identity
    }

    /// Check whether `namespace` is granted.
    pub fn has_namespace(&self, namespace: &str) -> bool {
        self.namespaces.read().contains(namespace)
    }

    /// Grant `namespace`. Returns false if it was already present.
    pub fn add_namespace(&self, namespace: &str) -> bool {
        let mut set = self.namespaces.write();
        if set.contains(namespace) {
            return false;
        }
        set.insert(namespace.to_owned())
    }

    /// Revoke `namespace`. Returns false if it was already absent.
    pub fn del_namespace(&self, namespace: &str) -> bool {
        self.namespaces.write().remove(namespace)
    }

    /// Snapshot of the granted namespaces in lexicographic order.
    pub fn namespaces(&self) -> Vec<String> {
        let mut out: Vec<String> = self.namespaces.read().iter().cloned().collect();
        out.sort_unstable();
        out
    }

    /// Number of granted namespaces.
    pub fn len(&self) -> usize {
        self.namespaces.read().len()
    }

    /// True if no namespace is granted.
    pub fn is_empty(&self) -> bool {
        self.namespaces.read().is_empty()
    }

    /// Encode the record.
    ///
    /// Namespaces are written in lexicographic byte order so equal sets
    /// always produce equal bytes.
    pub fn encode<W: Write + ?Sized>(&self, w: &mut W) -> Result<()> {
        let set = self.namespaces.read();
        let mut names: Vec<&String> = set.iter().collect();
        names.sort_unstable();

        self.identity.encode(w)?;
        write_len(w, names.len())?;
        for ns in names {
            write_var_string(w, ns)?;
        }
        Ok(())
    }

    /// Encode into a fresh buffer.
    pub fn encode_to_vec(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.encode(&mut buf)?;
        Ok(buf)
    }

    /// Decode a record, building a fresh identity and namespace set.
    pub fn decode<R: Read + ?Sized>(r: &mut R) -> Result<Self> {
        let identity = PublicKey::decode(r).at(Field::Identity)?;
        let count = read_u32(r).at(Field::NamespaceCount)?;
        let mut set = HashSet::with_capacity(prealloc(count));
        for _ in 0..count {
            set.insert(read_var_string(r).at(Field::Namespace)?);
        }
        Ok(Self {
            identity,
            namespaces: RwLock::new(set),
        })
    }
}
