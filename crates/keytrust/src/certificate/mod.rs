//! Public-key certificates as seen by the recipient builder.
//!
//! The module provides:
//! - The [`PublicCertificate`] contract every certificate handle satisfies
//! - Public key algorithm identifiers and their display letters
//! - 64-bit key ids derived from the key material
//! - The concrete [`Certificate`] stored by the file-backed key store

pub mod algo;
pub mod cert;
pub mod key_id;

pub use algo::{check_pubkey_algo, PubkeyAlgo};
pub use cert::{printable_user_id, Certificate};
pub use key_id::KeyId;

/// Read-only view of a public-key certificate.
///
/// Certificates are moved, never shared: the resolver hands one out, and
/// from then on exactly one owner holds it until it is released.
pub trait PublicCertificate {
    /// The 64-bit key id.
    fn key_id(&self) -> KeyId;

    /// Key length in bits.
    fn nbits(&self) -> u32;

    /// Public key algorithm.
    fn algo(&self) -> PubkeyAlgo;

    /// Creation date as `YYYY-MM-DD`.
    fn date_string(&self) -> String;

    /// The primary user id of the key owner, unescaped.
    fn user_id(&self) -> &str;

    /// Expiry time in microseconds since the epoch, if the key expires.
    fn expires_at(&self) -> Option<u64> {
        None
    }
}

/// Does `name` select `cert`?
///
/// Hex strings (optionally `0x`-prefixed) of 8 or 16 digits match the short
/// or long key id. A `0x`-prefixed name only ever matches a key id. Anything
/// else is a case-insensitive substring match on the user id.
pub fn name_matches<C: PublicCertificate + ?Sized>(cert: &C, name: &str) -> bool {
    let name = name.trim();
    if name.is_empty() {
        return false;
    }
    let hex = name
        .strip_prefix("0x")
        .or_else(|| name.strip_prefix("0X"));
    let prefixed = hex.is_some();
    let hex = hex.unwrap_or(name);
    if (hex.len() == 8 || hex.len() == 16) && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        let id = cert.key_id();
        let wanted = if hex.len() == 16 { id.long() } else { id.short() };
        if wanted.eq_ignore_ascii_case(hex) {
            return true;
        }
    }
    // A `0x` name is always a key id, even a malformed one.
    if prefixed {
        return false;
    }
    cert.user_id()
        .to_lowercase()
        .contains(&name.to_lowercase())
}
