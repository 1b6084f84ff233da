//! Proptest generators for property-based testing.

use std::collections::{BTreeMap, BTreeSet};

use bytes::Bytes;
use proptest::prelude::*;

use nsgate_core::PublicKey;
use nsgate_perms::PermissionRegistry;
use nsgate_tx::{StateUpdaterPayload, UpdaterAction};

/// Generate a random identity.
pub fn identity() -> impl Strategy<Value = PublicKey> {
    (any::<[u8; 32]>(), any::<[u8; 32]>()).prop_map(|(x, y)| PublicKey::from_coordinates(x, y))
}

/// Generate a namespace name.
pub fn namespace() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9._-]{0,23}".prop_map(String::from)
}

/// Generate a set of namespace names, possibly empty.
pub fn namespace_set(max: usize) -> impl Strategy<Value = BTreeSet<String>> {
    prop::collection::btree_set(namespace(), 0..=max)
}

/// Generate an opaque byte string of at most `max_len` bytes.
pub fn blob(max_len: usize) -> impl Strategy<Value = Bytes> {
    prop::collection::vec(any::<u8>(), 0..=max_len).prop_map(Bytes::from)
}

/// Generate an action.
pub fn action() -> impl Strategy<Value = UpdaterAction> {
    prop_oneof![Just(UpdaterAction::Add), Just(UpdaterAction::Sub)]
}

/// Generate a state updater payload. Namespaces may be arbitrary bytes.
pub fn payload() -> impl Strategy<Value = StateUpdaterPayload> {
    (blob(64), identity(), action(), blob(256)).prop_map(|(namespace, key, action, cert)| {
        StateUpdaterPayload::new(namespace, key, action, cert)
    })
}

/// Content of a registry: identity → namespace set.
#[derive(Debug, Clone)]
pub struct RegistryParams {
    pub entries: BTreeMap<PublicKey, BTreeSet<String>>,
}

impl RegistryParams {
    /// Build the registry.
    pub fn build(&self) -> PermissionRegistry {
        PermissionRegistry::new(
            self.entries
                .iter()
                .map(|(key, namespaces)| (*key, namespaces.iter().cloned())),
        )
    }
}

impl Arbitrary for RegistryParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop::collection::btree_map(identity(), namespace_set(6), 0..8)
            .prop_map(|entries| RegistryParams { entries })
            .boxed()
    }
}

/// Read a registry back into comparable form.
pub fn registry_contents(registry: &PermissionRegistry) -> BTreeMap<PublicKey, BTreeSet<String>> {
    registry
        .records()
        .iter()
        .map(|r| (*r.identity(), r.namespaces().into_iter().collect()))
        .collect()
}
