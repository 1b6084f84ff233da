//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::Arc;

use bytes::Bytes;
use nsgate::{AcceptAll, ExecutorConfig, StateUpdaterExecutor};
use nsgate_core::{Blake3Hash, PublicKey};
use nsgate_perms::PermissionRegistry;
use nsgate_tx::StateUpdaterPayload;
use rand::Rng;

const IDENTITY_X_CONTEXT: &str = "nsgate testkit identity x";
const IDENTITY_Y_CONTEXT: &str = "nsgate testkit identity y";

/// Derive a deterministic identity from a seed.
pub fn identity_from_seed(seed: &[u8; 32]) -> PublicKey {
    let x = Blake3Hash::derive(IDENTITY_X_CONTEXT, seed);
    let y = Blake3Hash::derive(IDENTITY_Y_CONTEXT, seed);
    PublicKey::from_coordinates(x.0, y.0)
}

/// Generate a random identity.
pub fn random_identity() -> PublicKey {
    let mut rng = rand::thread_rng();
    PublicKey::from_coordinates(rng.gen(), rng.gen())
}

/// An identity with helpers for building payloads about it.
pub struct TestFixture {
    pub identity: PublicKey,
}

impl TestFixture {
    /// Create a new test fixture with a random identity.
    pub fn new() -> Self {
        Self {
            identity: random_identity(),
        }
    }

    /// Create with a deterministic identity from seed.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self {
            identity: identity_from_seed(&seed),
        }
    }

    /// Grant `namespace` to this fixture's identity.
    pub fn grant(&self, namespace: &str, cert: &[u8]) -> StateUpdaterPayload {
        StateUpdaterPayload::add(
            Bytes::copy_from_slice(namespace.as_bytes()),
            self.identity,
            Bytes::copy_from_slice(cert),
        )
    }

    /// Revoke `namespace` from this fixture's identity.
    pub fn revoke(&self, namespace: &str, cert: &[u8]) -> StateUpdaterPayload {
        StateUpdaterPayload::sub(
            Bytes::copy_from_slice(namespace.as_bytes()),
            self.identity,
            Bytes::copy_from_slice(cert),
        )
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create multiple test fixtures for multi-party tests.
pub fn multi_party_fixtures(count: usize) -> Vec<TestFixture> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[..8].copy_from_slice(&(i as u64).to_le_bytes());
            TestFixture::with_seed(seed)
        })
        .collect()
}

/// An executor over an empty registry that accepts every certificate.
pub fn open_executor() -> StateUpdaterExecutor<AcceptAll> {
    StateUpdaterExecutor::new(
        Arc::new(PermissionRegistry::default()),
        AcceptAll,
        ExecutorConfig::default(),
    )
}
