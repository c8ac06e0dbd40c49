//! 64-bit key identifiers.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{RecipientError, Result};

use super::algo::PubkeyAlgo;

/// Key id of a certificate.
///
/// Computed as the last 8 bytes of SHA-256(algorithm code || key material).
/// Displays as the short form: the low 32 bits in 8 upper-case hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct KeyId(pub u64);

impl KeyId {
    /// Derive the key id for the given key material.
    pub fn compute(algo: PubkeyAlgo, key_material: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update([algo.id()]);
        hasher.update(key_material);
        let digest = hasher.finalize();
        let mut tail = [0u8; 8];
        tail.copy_from_slice(&digest[24..32]);
        Self(u64::from_be_bytes(tail))
    }

    /// Low 32 bits.
    pub fn low(self) -> u32 {
        self.0 as u32
    }

    /// 8 hex digits.
    pub fn short(self) -> String {
        format!("{:08X}", self.low())
    }

    /// 16 hex digits.
    pub fn long(self) -> String {
        format!("{:016X}", self.0)
    }

    /// Parse a 16-digit hex key id, with or without a `0x` prefix.
    pub fn parse_long(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let hex_str = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        if hex_str.len() != 16 {
            return Err(RecipientError::InvalidKey(format!(
                "key id must be 16 hex digits: {s}"
            )));
        }
        let bytes = hex::decode(hex_str)
            .map_err(|e| RecipientError::InvalidKey(format!("invalid key id {s}: {e}")))?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&bytes);
        Ok(Self(u64::from_be_bytes(raw)))
    }
}

impl std::fmt::Display for KeyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:08X}", self.low())
    }
}

impl std::str::FromStr for KeyId {
    type Err = RecipientError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_long(s)
    }
}

impl TryFrom<String> for KeyId {
    type Error = RecipientError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse_long(&s)
    }
}

impl From<KeyId> for String {
    fn from(id: KeyId) -> Self {
        id.long()
    }
}
