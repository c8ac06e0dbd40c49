//! Policy tests: the decision depends only on the trust level (and, for
//! first-seen keys, on what registration yields), never on the certificate.

use keytrust::{
    do_we_trust, Certificate, MemoryTrustDb, PubkeyAlgo, ScriptedTty, TrustConfig, TrustLevel,
};

fn certificates() -> Vec<Certificate> {
    let mut rsa = Certificate::generate_ed25519("rsa holder");
    rsa.algo = PubkeyAlgo::Rsa;
    rsa.nbits = 4096;
    vec![
        Certificate::generate_ed25519("Alice <alice@example.org>"),
        Certificate::generate_ed25519("").with_expiry(u64::MAX),
        rsa,
    ]
}

fn configs() -> [TrustConfig; 3] {
    [
        TrustConfig {
            batch: true,
            answer_no: false,
        },
        TrustConfig {
            batch: false,
            answer_no: true,
        },
        TrustConfig::default(),
    ]
}

#[test]
fn positive_levels_always_accept() {
    for cert in certificates() {
        for config in configs() {
            for level in [TrustLevel::Marginal, TrustLevel::Fully, TrustLevel::Ultimate] {
                let mut db = MemoryTrustDb::new();
                let mut tty = ScriptedTty::default();
                let decision = do_we_trust(&cert, level, &mut db, &mut tty, &config).unwrap();
                assert!(decision.is_accept());
            }
        }
    }
}

#[test]
fn other_levels_always_reject() {
    for cert in certificates() {
        for config in configs() {
            for level in [TrustLevel::Never, TrustLevel::Expired, TrustLevel::Undefined] {
                let mut db = MemoryTrustDb::new();
                // Enough answers for the interactive configuration.
                let mut tty = ScriptedTty::new(["4"]);
                let decision = do_we_trust(&cert, level, &mut db, &mut tty, &config).unwrap();
                assert!(!decision.is_accept());
            }
        }
    }
}

#[test]
fn first_seen_key_follows_registered_level() {
    let batch = TrustConfig {
        batch: true,
        answer_no: false,
    };
    for (registered, accepted) in [
        (TrustLevel::Undefined, false),
        (TrustLevel::Never, false),
        (TrustLevel::Marginal, true),
        (TrustLevel::Fully, true),
        (TrustLevel::Ultimate, true),
    ] {
        for cert in certificates() {
            let mut db = MemoryTrustDb::new().with_registered_level(registered);
            let mut tty = ScriptedTty::default();
            let decision =
                do_we_trust(&cert, TrustLevel::Unknown, &mut db, &mut tty, &batch).unwrap();
            assert_eq!(decision.is_accept(), accepted, "registered as {registered}");
        }
    }
}
