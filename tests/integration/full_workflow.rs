//! Integration test: file-backed key store and trust database driving the
//! recipient builder end to end.

use keytrust::{
    build_recipient_list, release_recipient_list, Certificate, FileTrustDb, KeyStore,
    KeytrustPaths, RecipientError, RecipientListBuilder, RejectReason, ScriptedTty, TrustConfig,
    TrustDb, TrustLevel,
};

const BATCH: TrustConfig = TrustConfig {
    batch: true,
    answer_no: false,
};

struct Keyring {
    _dir: tempfile::TempDir,
    keys: KeyStore,
    trust: FileTrustDb,
}

fn keyring() -> Keyring {
    let dir = tempfile::tempdir().unwrap();
    let paths = KeytrustPaths::new(dir.path());
    let keys = KeyStore::new(paths.keys_dir()).unwrap();
    let trust = FileTrustDb::new(paths.trust_dir()).unwrap();
    Keyring {
        _dir: dir,
        keys,
        trust,
    }
}

fn add(ring: &Keyring, user_id: &str, level: Option<TrustLevel>) -> Certificate {
    let cert = Certificate::generate_ed25519(user_id);
    ring.keys.save(&cert).unwrap();
    if let Some(level) = level {
        ring.trust.set_trust_level(&cert.key_id(), level).unwrap();
    }
    cert
}

#[test]
fn alice_trusted_bob_missing() {
    let mut ring = keyring();
    let alice = add(&ring, "Alice <alice@example.org>", Some(TrustLevel::Fully));
    let mut tty = ScriptedTty::default();
    let mut builder = RecipientListBuilder::new(&mut ring.keys, &mut ring.trust, &mut tty, &BATCH);

    let list = builder.build(&["alice", "bob"]).expect("alice should be accepted");
    assert_eq!(list.len(), 1);
    assert_eq!(list.head().unwrap().cert, alice);
    assert_eq!(builder.skipped().len(), 1);
    assert_eq!(builder.skipped()[0].name, "bob");
}

#[test]
fn first_seen_key_is_registered_then_undefined() {
    let mut ring = keyring();
    let carol = add(&ring, "Carol <carol@example.org>", None);
    let mut tty = ScriptedTty::default();

    let result = build_recipient_list(&mut ring.keys, &mut ring.trust, &mut tty, &BATCH, &["carol"]);
    assert!(matches!(result, Err(RecipientError::NoValidAddressees)));

    // The key is now known to the trust database.
    assert_eq!(
        ring.trust.check_trust(&carol).unwrap(),
        TrustLevel::Undefined
    );

    // Once an administrator vouches for it, it is accepted.
    ring.trust
        .set_trust_level(&carol.key_id(), TrustLevel::Marginal)
        .unwrap();
    let list =
        build_recipient_list(&mut ring.keys, &mut ring.trust, &mut tty, &BATCH, &["carol"]).unwrap();
    assert_eq!(list.len(), 1);
}

#[test]
fn never_trusted_key_is_rejected() {
    let mut ring = keyring();
    add(&ring, "Dave <dave@example.org>", Some(TrustLevel::Never));
    let mut tty = ScriptedTty::default();
    let mut builder = RecipientListBuilder::new(&mut ring.keys, &mut ring.trust, &mut tty, &BATCH);

    assert!(matches!(
        builder.build(&["dave"]),
        Err(RecipientError::NoValidAddressees)
    ));
    assert_eq!(builder.rejected()[0].1, RejectReason::Never);
}

#[test]
fn expired_key_is_rejected_as_not_implemented() {
    let mut ring = keyring();
    let old = Certificate::generate_ed25519("Old <old@example.org>").with_expiry(1);
    ring.keys.save(&old).unwrap();
    ring.trust
        .set_trust_level(&old.key_id(), TrustLevel::Fully)
        .unwrap();
    add(&ring, "Erin <erin@example.org>", Some(TrustLevel::Ultimate));

    let mut tty = ScriptedTty::default();
    let mut builder = RecipientListBuilder::new(&mut ring.keys, &mut ring.trust, &mut tty, &BATCH);
    let list = builder.build(&["old", "erin"]).unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(
        builder.rejected(),
        [("old".to_string(), RejectReason::ExpiredNotImplemented)]
    );
}

#[test]
fn interactive_ownertrust_is_not_persisted() {
    let mut ring = keyring();
    let gina = add(&ring, "Gina <gina@example.org>", Some(TrustLevel::Undefined));
    let mut tty = ScriptedTty::new(["x", "?", "5", "2"]);

    let result = build_recipient_list(
        &mut ring.keys,
        &mut ring.trust,
        &mut tty,
        &TrustConfig::default(),
        &["gina"],
    );
    assert!(matches!(result, Err(RecipientError::NoValidAddressees)));
    assert_eq!(tty.prompts().len(), 4);
    assert_eq!(
        ring.trust.check_trust(&gina).unwrap(),
        TrustLevel::Undefined
    );
}

#[test]
fn release_frees_one_certificate_per_node() {
    let mut ring = keyring();
    for name in ["a@x", "b@x", "c@x"] {
        add(&ring, name, Some(TrustLevel::Fully));
    }
    let mut tty = ScriptedTty::default();
    let list = build_recipient_list(
        &mut ring.keys,
        &mut ring.trust,
        &mut tty,
        &BATCH,
        &["a@x", "b@x", "c@x", "b@x"],
    )
    .unwrap();
    assert_eq!(list.len(), 4);
    assert_eq!(release_recipient_list(list), 4);
}

#[test]
fn empty_request_is_not_implemented() {
    let mut ring = keyring();
    let mut tty = ScriptedTty::default();
    let names: Vec<String> = Vec::new();
    let err = build_recipient_list(&mut ring.keys, &mut ring.trust, &mut tty, &BATCH, &names)
        .unwrap_err();
    assert!(err.is_not_implemented());
}

#[test]
fn corrupt_key_file_does_not_block_other_recipients() {
    let dir = tempfile::tempdir().unwrap();
    let paths = KeytrustPaths::new(dir.path());
    let mut keys = KeyStore::new(paths.keys_dir()).unwrap();
    let mut trust = FileTrustDb::new(paths.trust_dir()).unwrap();
    let alice = Certificate::generate_ed25519("Alice <alice@example.org>");
    keys.save(&alice).unwrap();
    trust
        .set_trust_level(&alice.key_id(), TrustLevel::Fully)
        .unwrap();
    std::fs::write(paths.keys_dir().join("FFFFFFFFFFFFFFFF.json"), b"{ nope").unwrap();

    let mut tty = ScriptedTty::default();
    let list = build_recipient_list(&mut keys, &mut trust, &mut tty, &BATCH, &["alice"]).unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list.head().unwrap().cert, alice);
}
