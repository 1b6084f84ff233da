//! # nsgate Testkit
//!
//! Testing utilities for nsgate.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known encodings pinning the wire layout
//! - **Generators**: Proptest strategies for identities, registries, payloads
//! - **Fixtures**: Deterministic identities and payload builders
//!
//! ## Golden Vectors
//!
//! ```rust
//! use nsgate_testkit::vectors::verify_all_vectors;
//!
//! for (name, matched, produced) in verify_all_vectors() {
//!     assert!(matched, "{name}: {produced}");
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use nsgate_testkit::generators::{registry_contents, RegistryParams};
//!
//! proptest! {
//!     #[test]
//!     fn roundtrip(params: RegistryParams) {
//!         let bytes = params.build().encode_to_vec().unwrap();
//!         let decoded = nsgate_perms::PermissionRegistry::decode(&mut bytes.as_slice()).unwrap();
//!         prop_assert_eq!(registry_contents(&decoded), params.entries);
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{
    identity_from_seed, multi_party_fixtures, open_executor, random_identity, TestFixture,
};
pub use generators::{registry_contents, RegistryParams};
pub use vectors::{all_vectors, verify_all_vectors, GoldenVector};
