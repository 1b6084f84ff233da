//! The permission registry: identity key → namespace record.
//!
//! The index lock and each record's lock are never held together. Lookups
//! clone the record's `Arc` out of the index and release the index before
//! the caller touches the record.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::sync::Arc;

use nsgate_core::codec::{prealloc, read_u32, write_len};
use nsgate_core::{Field, PublicKey};
use parking_lot::RwLock;
use tracing::debug;

use crate::error::{AtField, Result};
use crate::record::NamespaceRecord;

/// Index of namespace records keyed by [`PermissionRegistry::key_of`].
///
/// Wire layout:
///
/// ```text
/// Registry := U32(count) count × Record
/// ```
///
/// A registry-wide encode is not a consistent cut: each record serializes
/// under its own lock, so writers that race the encode may be reflected for
/// some records and not others. Quiesce writers for a point-in-time snapshot.
#[derive(Debug, Default)]
pub struct PermissionRegistry {
    records: RwLock<HashMap<String, Arc<NamespaceRecord>>>,
}

impl PermissionRegistry {
    /// Build a registry from an initial identity → namespaces mapping.
    ///
    /// Duplicate identities collapse to one record; the last entry wins.
    pub fn new<I, N, S>(initial: I) -> Self
    where
        I: IntoIterator<Item = (PublicKey, N)>,
        N: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let registry = Self::default();
        for (identity, namespaces) in initial {
            registry.add_record(NamespaceRecord::new(identity, namespaces));
        }
        registry
    }

    /// Derive the index key for an identity.
    pub fn key_of(identity: &PublicKey) -> String {
        identity.key_id()
    }

    /// Insert a record, replacing any existing record for the same identity.
    pub fn add_record(&self, record: NamespaceRecord) -> Arc<NamespaceRecord> {
        let key = Self::key_of(record.identity());
        let record = Arc::new(record);
        let replaced = self
            .records
            .write()
            .insert(key, Arc::clone(&record))
            .is_some();
        debug!(identity = %record.identity(), replaced, "namespace record stored");
        record
    }

    /// Get the record for `identity`, if any.
    pub fn lookup(&self, identity: &PublicKey) -> Option<Arc<NamespaceRecord>> {
        self.records.read().get(&Self::key_of(identity)).cloned()
    }

    /// Get the record for `identity`, inserting an empty one if absent.
    pub fn lookup_or_insert(&self, identity: &PublicKey) -> Arc<NamespaceRecord> {
        let key = Self::key_of(identity);
        if let Some(record) = self.records.read().get(&key) {
            return Arc::clone(record);
        }
        let mut records = self.records.write();
        Arc::clone(records.entry(key).or_insert_with(|| {
            debug!(identity = %identity, "namespace record created");
            Arc::new(NamespaceRecord::new(*identity, Vec::<String>::new()))
        }))
    }

    /// Check whether `identity` may write to `namespace`.
    pub fn has_namespace(&self, identity: &PublicKey, namespace: &str) -> bool {
        self.lookup(identity)
            .map(|record| record.has_namespace(namespace))
            .unwrap_or(false)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// True if the registry holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Snapshot of all records in ascending key order.
    pub fn records(&self) -> Vec<Arc<NamespaceRecord>> {
        let records = self.records.read();
        let mut entries: Vec<(&String, &Arc<NamespaceRecord>)> = records.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries.into_iter().map(|(_, r)| Arc::clone(r)).collect()
    }

    /// Encode the registry, records in ascending key order.
    ///
    /// The index is snapshotted first and released before any record is
    /// serialized.
    pub fn encode<W: Write + ?Sized>(&self, w: &mut W) -> Result<()> {
        let records = self.records();
        write_len(w, records.len())?;
        for record in &records {
            record.encode(w)?;
        }
        Ok(())
    }

    /// Encode into a fresh buffer.
    pub fn encode_to_vec(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.encode(&mut buf)?;
        Ok(buf)
    }

    /// Decode a registry.
    pub fn decode<R: Read + ?Sized>(r: &mut R) -> Result<Self> {
        let records = Self::decode_index(r)?;
        Ok(Self {
            records: RwLock::new(records),
        })
    }

    /// Replace all content with a decoded registry.
    ///
    /// The new index is built before the lock is taken. On error the
    /// registry is left as it was.
    pub fn reload<R: Read + ?Sized>(&self, r: &mut R) -> Result<()> {
        let records = Self::decode_index(r)?;
        let count = records.len();
        *self.records.write() = records;
        debug!(count, "permission registry reloaded");
        Ok(())
    }

    fn decode_index<R: Read + ?Sized>(
        r: &mut R,
    ) -> Result<HashMap<String, Arc<NamespaceRecord>>> {
        let count = read_u32(r).at(Field::RecordCount)?;
        let mut records = HashMap::with_capacity(prealloc(count));
        for _ in 0..count {
            let record = NamespaceRecord::decode(r)?;
            records.insert(Self::key_of(record.identity()), Arc::new(record));
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PermsError;
    use nsgate_core::CodecError;
    use std::collections::BTreeSet;
    use std::io;

    fn identity(b: u8) -> PublicKey {
        PublicKey::from_coordinates([b; 32], [0x80 | b; 32])
    }

    fn contents(registry: &PermissionRegistry) -> Vec<(PublicKey, BTreeSet<String>)> {
        registry
            .records()
            .iter()
            .map(|r| (*r.identity(), r.namespaces().into_iter().collect()))
            .collect()
    }

    #[test]
    fn test_new_and_query() {
        let a = identity(1);
        let b = identity(2);
        let registry = PermissionRegistry::new([(a, vec!["finance", "hr"]), (b, vec![])]);

        assert_eq!(registry.len(), 2);
        assert!(registry.has_namespace(&a, "finance"));
        assert!(registry.has_namespace(&a, "hr"));
        assert!(!registry.has_namespace(&b, "finance"));
        assert!(!registry.has_namespace(&identity(3), "finance"));
        assert!(registry.lookup(&identity(3)).is_none());
    }

    #[test]
    fn test_duplicate_identity_last_wins() {
        let a = identity(1);
        let registry = PermissionRegistry::new([(a, vec!["old"]), (a, vec!["new"])]);
        assert_eq!(registry.len(), 1);
        assert!(registry.has_namespace(&a, "new"));
        assert!(!registry.has_namespace(&a, "old"));
    }

    #[test]
    fn test_add_record_overwrites() {
        let a = identity(1);
        let registry = PermissionRegistry::new([(a, vec!["finance"])]);
        registry.add_record(NamespaceRecord::new(a, ["ops"]));
        assert_eq!(registry.len(), 1);
        assert!(!registry.has_namespace(&a, "finance"));
        assert!(registry.has_namespace(&a, "ops"));
    }

    #[test]
    fn test_lookup_shares_record() {
        let a = identity(1);
        let registry = PermissionRegistry::new([(a, Vec::<String>::new())]);
        let record = registry.lookup(&a).unwrap();
        assert!(record.add_namespace("finance"));
        assert!(registry.has_namespace(&a, "finance"));
    }

    #[test]
    fn test_lookup_or_insert() {
        let a = identity(9);
        let registry = PermissionRegistry::default();
        let first = registry.lookup_or_insert(&a);
        assert!(first.is_empty());
        first.add_namespace("x");
        let second = registry.lookup_or_insert(&a);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_example_roundtrip() {
        let a = identity(1);
        let b = identity(2);
        let registry = PermissionRegistry::new([(a, vec!["finance", "hr"]), (b, vec![])]);
        let bytes = registry.encode_to_vec().unwrap();
        let decoded = PermissionRegistry::decode(&mut bytes.as_slice()).unwrap();
        assert_eq!(contents(&decoded), contents(&registry));
        assert!(decoded.has_namespace(&a, "hr"));
        assert!(decoded.lookup(&b).unwrap().is_empty());
    }

    #[test]
    fn test_empty_registry_encoding() {
        let registry = PermissionRegistry::default();
        assert_eq!(registry.encode_to_vec().unwrap(), vec![0, 0, 0, 0]);
        let decoded = PermissionRegistry::decode(&mut [0u8, 0, 0, 0].as_slice()).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_encoding_independent_of_insertion_order() {
        let a = identity(1);
        let b = identity(2);
        let c = identity(3);
        let one = PermissionRegistry::new([
            (a, vec!["x", "y"]),
            (b, vec!["z"]),
            (c, vec![]),
        ]);
        let two = PermissionRegistry::new([
            (c, vec![]),
            (b, vec!["z"]),
            (a, vec!["y", "x"]),
        ]);
        assert_eq!(one.encode_to_vec().unwrap(), two.encode_to_vec().unwrap());
    }

    #[test]
    fn test_reload_replaces_content() {
        let a = identity(1);
        let b = identity(2);
        let source = PermissionRegistry::new([(b, vec!["ops"])]);
        let bytes = source.encode_to_vec().unwrap();

        let target = PermissionRegistry::new([(a, vec!["finance"])]);
        target.reload(&mut bytes.as_slice()).unwrap();
        assert!(target.lookup(&a).is_none());
        assert!(target.has_namespace(&b, "ops"));
    }

    #[test]
    fn test_failed_reload_keeps_content() {
        let a = identity(1);
        let target = PermissionRegistry::new([(a, vec!["finance"])]);
        let err = target.reload(&mut [1u8, 0, 0, 0].as_slice()).unwrap_err();
        assert_eq!(err.field(), Some(Field::Identity));
        assert!(target.has_namespace(&a, "finance"));
    }

    /// Accepts `cap` bytes, then rejects every write.
    struct FailAfter {
        cap: usize,
        written: Vec<u8>,
    }

    impl Write for FailAfter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let room = self.cap - self.written.len();
            if room == 0 {
                return Err(io::Error::new(io::ErrorKind::Other, "sink full"));
            }
            let n = room.min(buf.len());
            self.written.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_encode_stops_at_rejected_write() {
        let registry = PermissionRegistry::new([(identity(1), vec!["finance"])]);
        let full = registry.encode_to_vec().unwrap();
        assert_eq!(full.len(), 4 + 65 + 4 + 4 + 7);

        // count, identity, namespace count, namespace prefix, namespace bytes
        for cap in [0, 2, 10, 70, 75, 80] {
            let mut sink = FailAfter {
                cap,
                written: Vec::new(),
            };
            let err = registry.encode(&mut sink).unwrap_err();
            assert!(
                matches!(err, PermsError::Codec(CodecError::Io(_))),
                "cap {cap}: {err}"
            );
            assert_eq!(sink.written, full[..cap], "cap {cap}");
        }
    }

    #[test]
    fn test_record_encode_surfaces_sink_error() {
        let record = NamespaceRecord::new(identity(2), ["hr"]);
        let mut sink = FailAfter {
            cap: 66,
            written: Vec::new(),
        };
        let err = record.encode(&mut sink).unwrap_err();
        assert!(matches!(err, PermsError::Codec(CodecError::Io(_))));
    }

    #[test]
    fn test_truncated_count() {
        let err = PermissionRegistry::decode(&mut [1u8, 0].as_slice()).unwrap_err();
        assert_eq!(err.field(), Some(Field::RecordCount));
    }
}
