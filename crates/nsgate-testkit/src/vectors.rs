//! Golden test vectors for byte-exact verification.
//!
//! Nodes agree on checkpoint hashes only if every implementation writes the
//! same bytes. These vectors pin the wire layout of records, registries, and
//! payloads.

use bytes::Bytes;
use serde::Serialize;

use nsgate_core::PublicKey;
use nsgate_perms::{NamespaceRecord, PermissionRegistry};
use nsgate_tx::{StateUpdaterPayload, UpdaterAction, STATE_UPDATER_PAYLOAD_VERSION};

/// A golden test vector.
#[derive(Debug, Clone, Serialize)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Encoded bytes produced by this implementation (hex).
    pub encoded: String,
    /// Expected encoding (hex).
    pub expected: &'static str,
}

impl GoldenVector {
    /// True if the produced bytes match the expected bytes.
    pub fn matches(&self) -> bool {
        self.encoded == self.expected
    }
}

/// Identity A: x = 0x01.., y = 0x02..
pub fn identity_a() -> PublicKey {
    PublicKey::from_coordinates([0x01; 32], [0x02; 32])
}

/// Identity B: x = 0x03.., y = 0x04..
pub fn identity_b() -> PublicKey {
    PublicKey::from_coordinates([0x03; 32], [0x04; 32])
}

/// The example registry `{A: ["finance", "hr"], B: []}`.
pub fn example_registry() -> PermissionRegistry {
    PermissionRegistry::new([
        (identity_a(), vec!["hr", "finance"]),
        (identity_b(), vec![]),
    ])
}

const RECORD_A: &str = "04\
0101010101010101010101010101010101010101010101010101010101010101\
0202020202020202020202020202020202020202020202020202020202020202\
02000000\
0700000066696e616e6365\
020000006872";

const REGISTRY_EXAMPLE: &str = "02000000\
04\
0101010101010101010101010101010101010101010101010101010101010101\
0202020202020202020202020202020202020202020202020202020202020202\
02000000\
0700000066696e616e6365\
020000006872\
04\
0303030303030303030303030303030303030303030303030303030303030303\
0404040404040404040404040404040404040404040404040404040404040404\
00000000";

const PAYLOAD_ADD_FINANCE: &str = "0700000066696e616e6365\
04\
0101010101010101010101010101010101010101010101010101010101010101\
0202020202020202020202020202020202020202020202020202020202020202\
00\
00000000";

const PAYLOAD_SUB_HR: &str = "020000006872\
04\
0303030303030303030303030303030303030303030303030303030303030303\
0404040404040404040404040404040404040404040404040404040404040404\
01\
04000000deadbeef";

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    let record = NamespaceRecord::new(identity_a(), ["hr", "finance"]);
    let add = StateUpdaterPayload::add("finance", identity_a(), Bytes::new());
    let sub = StateUpdaterPayload::new(
        "hr",
        identity_b(),
        UpdaterAction::Sub,
        Bytes::from_static(&[0xde, 0xad, 0xbe, 0xef]),
    );

    vec![
        vector("record A finance+hr", record.encode_to_vec().ok(), RECORD_A),
        vector(
            "registry A finance+hr, B empty",
            example_registry().encode_to_vec().ok(),
            REGISTRY_EXAMPLE,
        ),
        vector(
            "payload add finance, empty cert",
            add.data(STATE_UPDATER_PAYLOAD_VERSION).ok(),
            PAYLOAD_ADD_FINANCE,
        ),
        vector(
            "payload sub hr, 4-byte cert",
            sub.data(STATE_UPDATER_PAYLOAD_VERSION).ok(),
            PAYLOAD_SUB_HR,
        ),
    ]
}

fn vector(name: &'static str, encoded: Option<Vec<u8>>, expected: &'static str) -> GoldenVector {
    GoldenVector {
        name,
        encoded: encoded.map(hex::encode).unwrap_or_default(),
        expected,
    }
}

/// Verify all golden vectors; returns (name, matched, produced hex).
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .into_iter()
        .map(|v| (v.name.to_string(), v.matches(), v.encoded))
        .collect()
}

/// All vectors as pretty JSON, for sharing with other implementations.
pub fn vectors_json() -> serde_json::Result<String> {
    serde_json::to_string_pretty(&all_vectors())
}
