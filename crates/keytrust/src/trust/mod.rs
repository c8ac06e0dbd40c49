//! Trust policy: deciding whether a certificate may be used as a recipient.
//!
//! The trust module provides:
//! - The closed set of trust levels reported by the trust database
//! - The accept/reject decision, including first-seen registration
//! - The interactive ownertrust dialog for undetermined keys

pub mod decision;
pub mod level;
pub mod query;

pub use decision::{do_we_trust, RejectReason, TrustDecision};
pub use level::TrustLevel;
pub use query::{query_ownertrust, Ownertrust};
