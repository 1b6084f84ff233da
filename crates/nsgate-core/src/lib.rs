//! # nsgate Core
//!
//! Pure primitives shared by the nsgate crates: the binary codec, public-key
//! identities, and state digests.
//!
//! This crate contains no locking and no I/O beyond the `Read`/`Write`
//! handles callers pass in.
//!
//! ## Key Types
//!
//! - [`PublicKey`] - An identity with two fixed-width coordinates
//! - [`Blake3Hash`] - Digest of encoded state
//! - [`CodecError`] - Failure from a primitive or identity codec
//! - [`Field`] - Names the wire field a decode failed at
//!
//! ## Wire primitives
//!
//! See the [`codec`] module. All integers are little-endian.

pub mod codec;
pub mod crypto;
pub mod error;
pub mod identity;

pub use crypto::Blake3Hash;
pub use error::{CodecError, Field, Result};
pub use identity::PublicKey;
