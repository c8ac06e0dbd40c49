//! keytrust: recipient key selection for public-key messaging.
//!
//! Resolves the identities a message is addressed to, checks every
//! certificate against the trust database and the acceptance policy, and
//! hands back an owned list of the certificates that passed.

pub mod certificate;
pub mod config;
pub mod error;
pub mod keyring;
pub mod recipient;
pub mod storage;
pub mod time;
pub mod trust;
pub mod tty;

// Re-export primary types
pub use certificate::{Certificate, KeyId, PubkeyAlgo, PublicCertificate};
pub use config::{KeytrustPaths, TrustConfig};
pub use error::{RecipientError, Result};
pub use keyring::{KeyDirectory, MemoryKeyDirectory, MemoryTrustDb, TrustDb};
pub use recipient::{
    build_recipient_list, release_recipient_list, RecipientList, RecipientListBuilder,
    RecipientNode, SkippedRecipient,
};
pub use storage::{FileTrustDb, KeyStore, TrustRecord};
pub use trust::{
    do_we_trust, query_ownertrust, Ownertrust, RejectReason, TrustDecision, TrustLevel,
};
pub use tty::{ScriptedTty, StdTty, Tty};
