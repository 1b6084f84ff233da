//! The executor: applies state updater payloads to the permission registry.
//!
//! Certificate checks are delegated to a [`CertPolicy`]. The executor only
//! decides what a payload means for the registry once the policy accepts it.

use std::sync::Arc;

use nsgate_core::{Blake3Hash, PublicKey};
use nsgate_perms::{GenesisConfig, PermissionRegistry};
use nsgate_tx::{StateUpdaterPayload, UpdaterAction, STATE_UPDATER_PAYLOAD_VERSION};
use tracing::{debug, warn};

use crate::error::{ExecutorError, Result};

/// Domain separation context for registry state hashes.
pub const STATE_HASH_CONTEXT: &str = "nsgate 2026-01 permission registry state";

/// Decides whether a payload's certificate authorizes it.
pub trait CertPolicy: Send + Sync {
    /// Return `Err(reason)` to reject the payload.
    fn check(
        &self,
        payload: &StateUpdaterPayload,
        registry: &PermissionRegistry,
    ) -> std::result::Result<(), String>;
}

/// Accepts every certificate. For tests and genesis tooling.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl CertPolicy for AcceptAll {
    fn check(
        &self,
        _payload: &StateUpdaterPayload,
        _registry: &PermissionRegistry,
    ) -> std::result::Result<(), String> {
        Ok(())
    }
}

impl<F> CertPolicy for F
where
    F: Fn(&StateUpdaterPayload, &PermissionRegistry) -> std::result::Result<(), String>
        + Send
        + Sync,
{
    fn check(
        &self,
        payload: &StateUpdaterPayload,
        registry: &PermissionRegistry,
    ) -> std::result::Result<(), String> {
        self(payload, registry)
    }
}

/// Configuration for the executor.
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Payload format version used by [`StateUpdaterExecutor::apply_bytes`].
    pub payload_version: u8,
    /// Reject payloads whose certificate is empty before consulting the policy.
    pub require_cert: bool,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            payload_version: STATE_UPDATER_PAYLOAD_VERSION,
            require_cert: false,
        }
    }
}

/// What applying a payload did to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The namespace was granted.
    Granted,
    /// The namespace was revoked.
    Revoked,
    /// The grant already existed, or the revoked grant was already absent.
    Unchanged,
}

/// Applies state updater payloads to a shared registry.
pub struct StateUpdaterExecutor<P: CertPolicy = AcceptAll> {
    registry: Arc<PermissionRegistry>,
    policy: P,
    config: ExecutorConfig,
}

impl<P: CertPolicy> StateUpdaterExecutor<P> {
    /// Create an executor over an existing registry.
    pub fn new(registry: Arc<PermissionRegistry>, policy: P, config: ExecutorConfig) -> Self {
        Self {
            registry,
            policy,
            config,
        }
    }

    /// Create an executor over the genesis registry.
    pub fn from_genesis(genesis: &GenesisConfig, policy: P, config: ExecutorConfig) -> Self {
        Self::new(Arc::new(genesis.build_registry()), policy, config)
    }

    /// The registry this executor mutates.
    pub fn registry(&self) -> &Arc<PermissionRegistry> {
        &self.registry
    }

    /// The executor configuration.
    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Check whether `identity` may write to `namespace`.
    pub fn can_write(&self, identity: &PublicKey, namespace: &str) -> bool {
        self.registry.has_namespace(identity, namespace)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Payload Application
    // ─────────────────────────────────────────────────────────────────────────

    /// Apply one payload.
    pub fn apply(&self, payload: &StateUpdaterPayload) -> Result<ApplyOutcome> {
        let namespace = match payload.namespace_str() {
            Some("") => return Err(self.reject_namespace(payload, "empty namespace")),
            Some(ns) => ns,
            None => return Err(self.reject_namespace(payload, "namespace is not utf-8")),
        };

        if self.config.require_cert && payload.cert.is_empty() {
            warn!(identity = %payload.public_key, namespace, "state updater missing cert");
            return Err(ExecutorError::Rejected("missing cert".into()));
        }

        if let Err(reason) = self.policy.check(payload, &self.registry) {
            warn!(identity = %payload.public_key, namespace, %reason, "state updater rejected");
            return Err(ExecutorError::Rejected(reason));
        }

        let outcome = match payload.action {
            UpdaterAction::Add => {
                let record = self.registry.lookup_or_insert(&payload.public_key);
                if record.add_namespace(namespace) {
                    ApplyOutcome::Granted
                } else {
                    ApplyOutcome::Unchanged
                }
            }
            UpdaterAction::Sub => match self.registry.lookup(&payload.public_key) {
                Some(record) if record.del_namespace(namespace) => ApplyOutcome::Revoked,
                _ => ApplyOutcome::Unchanged,
            },
        };

        debug!(
            identity = %payload.public_key,
            namespace,
            action = ?payload.action,
            outcome = ?outcome,
            "state updater applied"
        );
        Ok(outcome)
    }

    /// Decode a payload at the configured version and apply it.
    pub fn apply_bytes(&self, data: &[u8]) -> Result<ApplyOutcome> {
        let mut reader = data;
        let payload = StateUpdaterPayload::decode(&mut reader, self.config.payload_version)?;
        if !reader.is_empty() {
            return Err(ExecutorError::TrailingBytes(reader.len()));
        }
        self.apply(&payload)
    }

    fn reject_namespace(&self, payload: &StateUpdaterPayload, reason: &str) -> ExecutorError {
        warn!(identity = %payload.public_key, reason, "state updater rejected");
        ExecutorError::InvalidNamespace(reason.to_owned())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Checkpoints
    // ─────────────────────────────────────────────────────────────────────────

    /// Encode the registry for a ledger-state checkpoint.
    ///
    /// Not a consistent cut if writers run concurrently.
    pub fn snapshot(&self) -> Result<Vec<u8>> {
        Ok(self.registry.encode_to_vec()?)
    }

    /// Hash of the checkpoint encoding.
    pub fn state_hash(&self) -> Result<Blake3Hash> {
        let snapshot = self.snapshot()?;
        Ok(Blake3Hash::derive(STATE_HASH_CONTEXT, &snapshot))
    }

    /// Replace the registry content with a checkpoint.
    pub fn restore(&self, snapshot: &[u8]) -> Result<()> {
        let mut reader = snapshot;
        self.registry.reload(&mut reader)?;
        Ok(())
    }
}
