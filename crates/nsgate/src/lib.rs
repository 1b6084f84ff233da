//! # nsgate
//!
//! Namespace-scoped write permissions for ledger state.
//!
//! ## Overview
//!
//! - **Registry**: which identities may write to which namespaces
//! - **Payloads**: transactions that grant (`Add`) or revoke (`Sub`) one namespace
//! - **Executor**: applies accepted payloads to the registry and produces
//!   checkpoints for state sync
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use nsgate::{AcceptAll, ApplyOutcome, ExecutorConfig, StateUpdaterExecutor};
//! use nsgate::core::PublicKey;
//! use nsgate::perms::PermissionRegistry;
//! use nsgate::tx::StateUpdaterPayload;
//!
//! let alice = PublicKey::from_coordinates([1; 32], [2; 32]);
//! let registry = Arc::new(PermissionRegistry::new([(alice, vec!["hr"])]));
//! let executor = StateUpdaterExecutor::new(registry, AcceptAll, ExecutorConfig::default());
//!
//! let grant = StateUpdaterPayload::add("finance", alice, &b""[..]);
//! assert_eq!(executor.apply(&grant).unwrap(), ApplyOutcome::Granted);
//! assert!(executor.can_write(&alice, "finance"));
//!
//! let checkpoint = executor.snapshot().unwrap();
//! let hash = executor.state_hash().unwrap();
//! # let _ = (checkpoint, hash);
//! ```
//!
//! ## Re-exports
//!
//! - `nsgate::core` - Codec primitives and identities
//! - `nsgate::perms` - Records, registry, genesis config
//! - `nsgate::tx` - State updater payloads

pub mod error;
pub mod executor;

pub use nsgate_core as core;
pub use nsgate_perms as perms;
pub use nsgate_tx as tx;

pub use error::{ExecutorError, Result};
pub use executor::{
    AcceptAll, ApplyOutcome, CertPolicy, ExecutorConfig, StateUpdaterExecutor, STATE_HASH_CONTEXT,
};

pub use nsgate_core::{Blake3Hash, PublicKey};
pub use nsgate_perms::{GenesisConfig, NamespaceRecord, PermissionRegistry};
pub use nsgate_tx::{StateUpdaterPayload, UpdaterAction, STATE_UPDATER_PAYLOAD_VERSION};
