//! End-to-end flows: genesis bootstrap, payload application, checkpoint sync.

use std::io::Write;
use std::sync::Arc;
use std::thread;

use nsgate::core::Field;
use nsgate::perms::PermsError;
use nsgate::tx::TxError;
use nsgate::{
    AcceptAll, ApplyOutcome, ExecutorConfig, ExecutorError, GenesisConfig, PermissionRegistry,
    StateUpdaterExecutor, StateUpdaterPayload, STATE_UPDATER_PAYLOAD_VERSION,
};
use nsgate_testkit::vectors::{example_registry, identity_a, identity_b};
use nsgate_testkit::{multi_party_fixtures, open_executor, registry_contents, TestFixture};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

#[test]
fn genesis_file_to_checkpoint_and_back() {
    init_tracing();
    let parties = multi_party_fixtures(2);
    let genesis_json = format!(
        r#"{{
            "state_updaters": [
                {{ "public_key": "{}", "namespaces": ["finance", "hr"] }},
                {{ "public_key": "{}", "namespaces": [] }}
            ]
        }}"#,
        parties[0].identity.to_hex(),
        parties[1].identity.to_hex(),
    );
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(genesis_json.as_bytes()).unwrap();

    let genesis = GenesisConfig::from_file(file.path()).unwrap();
    let node_a = StateUpdaterExecutor::from_genesis(&genesis, AcceptAll, ExecutorConfig::default());

    let grant = parties[1].grant("ops", b"cert");
    let data = grant.data(STATE_UPDATER_PAYLOAD_VERSION).unwrap();
    assert_eq!(node_a.apply_bytes(&data).unwrap(), ApplyOutcome::Granted);

    let revoke = parties[0].revoke("hr", b"cert");
    assert_eq!(node_a.apply(&revoke).unwrap(), ApplyOutcome::Revoked);

    // A second node resyncs from node A's checkpoint.
    let node_b = open_executor();
    node_b.restore(&node_a.snapshot().unwrap()).unwrap();

    assert_eq!(node_a.state_hash().unwrap(), node_b.state_hash().unwrap());
    assert_eq!(
        registry_contents(node_a.registry()),
        registry_contents(node_b.registry())
    );
    assert!(node_b.can_write(&parties[0].identity, "finance"));
    assert!(!node_b.can_write(&parties[0].identity, "hr"));
    assert!(node_b.can_write(&parties[1].identity, "ops"));
}

#[test]
fn example_registry_roundtrips() {
    let registry = example_registry();
    let bytes = registry.encode_to_vec().unwrap();
    let decoded = PermissionRegistry::decode(&mut bytes.as_slice()).unwrap();

    let contents = registry_contents(&decoded);
    assert_eq!(contents.len(), 2);
    assert_eq!(
        contents[&identity_a()].iter().collect::<Vec<_>>(),
        vec!["finance", "hr"]
    );
    assert!(contents[&identity_b()].is_empty());
}

#[test]
fn same_state_different_history_same_hash() {
    let fixture = TestFixture::with_seed([9; 32]);

    let one = open_executor();
    for ns in ["a", "b", "c"] {
        one.apply(&fixture.grant(ns, b"")).unwrap();
    }

    let two = open_executor();
    for ns in ["c", "x", "b", "a"] {
        two.apply(&fixture.grant(ns, b"")).unwrap();
    }
    two.apply(&fixture.revoke("x", b"")).unwrap();

    assert_eq!(one.snapshot().unwrap(), two.snapshot().unwrap());
    assert_eq!(one.state_hash().unwrap(), two.state_hash().unwrap());
}

#[test]
fn truncated_registry_names_field() {
    let bytes = example_registry().encode_to_vec().unwrap();
    // count: 0..4, record A identity: 4..69, A namespace count: 69..73,
    // "finance" prefix: 73..77.
    let cases = [
        (0, Field::RecordCount),
        (3, Field::RecordCount),
        (4, Field::Identity),
        (69, Field::NamespaceCount),
        (73, Field::Namespace),
        (75, Field::Namespace),
        (bytes.len() - 1, Field::NamespaceCount),
    ];
    for (cut, field) in cases {
        let err = PermissionRegistry::decode(&mut &bytes[..cut]).unwrap_err();
        assert!(
            matches!(err, PermsError::Decode { field: f, .. } if f == field),
            "cut at {cut}: {err}"
        );
    }
}

#[test]
fn truncated_payload_names_field() {
    let payload = StateUpdaterPayload::add("finance", identity_a(), &b""[..]);
    let data = payload.data(STATE_UPDATER_PAYLOAD_VERSION).unwrap();
    let action_at = 4 + 7 + 65;

    let err = StateUpdaterPayload::decode(&mut &data[..action_at], STATE_UPDATER_PAYLOAD_VERSION)
        .unwrap_err();
    assert!(matches!(
        err,
        TxError::Decode {
            field: Field::Action,
            ..
        }
    ));

    let exec = open_executor();
    let err = exec.apply_bytes(&data[..action_at + 1]).unwrap_err();
    assert!(matches!(
        err,
        ExecutorError::Payload(TxError::Decode {
            field: Field::Cert,
            ..
        })
    ));
}

#[test]
fn concurrent_grants_on_shared_registry() {
    init_tracing();
    let parties = multi_party_fixtures(8);
    let registry = Arc::new(PermissionRegistry::default());
    let exec = Arc::new(StateUpdaterExecutor::new(
        Arc::clone(&registry),
        AcceptAll,
        ExecutorConfig::default(),
    ));

    let handles: Vec<_> = parties
        .iter()
        .map(|party| {
            let exec = Arc::clone(&exec);
            let identity = party.identity;
            thread::spawn(move || {
                let fixture = TestFixture { identity };
                for i in 0..50 {
                    let ns = format!("ns-{i}");
                    assert_eq!(
                        exec.apply(&fixture.grant(&ns, b"")).unwrap(),
                        ApplyOutcome::Granted
                    );
                    assert!(exec.can_write(&identity, &ns));
                    // Snapshots may interleave with writers without failing.
                    exec.snapshot().unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(registry.len(), parties.len());
    for party in &parties {
        assert_eq!(registry.lookup(&party.identity).unwrap().len(), 50);
    }
}

#[test]
fn concurrent_add_same_namespace_grants_once() {
    let fixture = TestFixture::with_seed([3; 32]);
    let exec = Arc::new(open_executor());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let exec = Arc::clone(&exec);
            let payload = fixture.grant("finance", b"");
            thread::spawn(move || exec.apply(&payload).unwrap())
        })
        .collect();

    let granted = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|outcome| *outcome == ApplyOutcome::Granted)
        .count();
    assert_eq!(granted, 1);
    assert!(exec.can_write(&fixture.identity, "finance"));
}
