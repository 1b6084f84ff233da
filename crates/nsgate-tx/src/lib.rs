//! # nsgate Transactions
//!
//! Consensus-visible payloads that change namespace write permission.
//!
//! A [`StateUpdaterPayload`] asks the ledger executor to grant
//! ([`UpdaterAction::Add`]) or revoke ([`UpdaterAction::Sub`]) one namespace
//! for one identity. The certificate it carries is opaque here.
//!
//! Every encode and decode call takes the payload format version. Only
//! version [`STATE_UPDATER_PAYLOAD_VERSION`] is defined.
//!
//! ```rust
//! use nsgate_core::PublicKey;
//! use nsgate_tx::{StateUpdaterPayload, STATE_UPDATER_PAYLOAD_VERSION};
//!
//! let key = PublicKey::from_coordinates([1; 32], [2; 32]);
//! let payload = StateUpdaterPayload::add("finance", key, &b""[..]);
//! let data = payload.data(STATE_UPDATER_PAYLOAD_VERSION).unwrap();
//! let decoded =
//!     StateUpdaterPayload::decode(&mut data.as_slice(), STATE_UPDATER_PAYLOAD_VERSION).unwrap();
//! assert_eq!(decoded, payload);
//! ```

pub mod error;
pub mod payload;

pub use error::{Result, TxError};
pub use payload::{StateUpdaterPayload, UpdaterAction, STATE_UPDATER_PAYLOAD_VERSION};
