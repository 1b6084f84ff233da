//! # nsgate Permissions
//!
//! Namespace-scoped write permissions for ledger state.
//!
//! ## Overview
//!
//! Each identity that may update shared state owns a [`NamespaceRecord`]: the
//! set of namespaces it is allowed to write. The [`PermissionRegistry`] indexes
//! those records by a key derived from the identity's coordinates.
//!
//! Both structures are safe to share across threads. Every record carries its
//! own readers-writer lock and the registry carries one for its index; the two
//! are never held at the same time.
//!
//! ## Encoding
//!
//! ```text
//! Record   := Identity U32(count) count × LenPrefixed(namespace)
//! Registry := U32(count) count × Record
//! ```
//!
//! Namespaces and records are written in sorted order, so two nodes holding
//! the same permissions produce the same bytes.
//!
//! ## Usage
//!
//! ```rust
//! use nsgate_core::PublicKey;
//! use nsgate_perms::PermissionRegistry;
//!
//! let alice = PublicKey::from_coordinates([1; 32], [2; 32]);
//! let registry = PermissionRegistry::new([(alice, vec!["finance"])]);
//! assert!(registry.has_namespace(&alice, "finance"));
//!
//! let snapshot = registry.encode_to_vec().unwrap();
//! let restored = PermissionRegistry::decode(&mut snapshot.as_slice()).unwrap();
//! assert!(restored.has_namespace(&alice, "finance"));
//! ```

pub mod error;
pub mod genesis;
pub mod record;
pub mod registry;

pub use error::{PermsError, Result};
pub use genesis::{GenesisConfig, GenesisUpdater};
pub use record::NamespaceRecord;
pub use registry::PermissionRegistry;
