//! The concrete certificate record kept by the key store.

use ed25519_dalek::{SigningKey, VerifyingKey};
use serde::{Deserialize, Serialize};

use crate::error::{RecipientError, Result};

use super::algo::PubkeyAlgo;
use super::key_id::KeyId;
use super::PublicCertificate;

/// A public-key certificate: key material plus its owner's user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    /// Public key algorithm.
    pub algo: PubkeyAlgo,
    /// Raw public key material (base64 on disk).
    #[serde(with = "key_material_b64")]
    pub key_material: Vec<u8>,
    /// Key length in bits.
    pub nbits: u32,
    /// Creation timestamp (microseconds since Unix epoch).
    pub created_at: u64,
    /// Expiry timestamp (microseconds since Unix epoch), if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<u64>,
    /// Primary user id, e.g. `Alice <alice@example.org>`.
    pub user_id: String,
}

impl Certificate {
    /// Wrap an Ed25519 public key.
    pub fn from_ed25519(key: &VerifyingKey, user_id: impl Into<String>, created_at: u64) -> Self {
        Self {
            algo: PubkeyAlgo::Ed25519,
            key_material: key.to_bytes().to_vec(),
            nbits: 256,
            created_at,
            expires_at: None,
            user_id: user_id.into(),
        }
    }

    /// Wrap an Ed25519 public key given as 64 hex digits.
    pub fn from_ed25519_hex(key_hex: &str, user_id: impl Into<String>) -> Result<Self> {
        let bytes = hex::decode(key_hex.trim())
            .map_err(|e| RecipientError::InvalidKey(format!("invalid hex: {e}")))?;
        let raw: [u8; 32] = bytes.as_slice().try_into().map_err(|_| {
            RecipientError::InvalidKey(format!(
                "Ed25519 public key must be 32 bytes, got {}",
                bytes.len()
            ))
        })?;
        let key = VerifyingKey::from_bytes(&raw)
            .map_err(|e| RecipientError::InvalidKey(format!("invalid verifying key: {e}")))?;
        Ok(Self::from_ed25519(&key, user_id, crate::time::now_micros()))
    }

    /// Generate a fresh Ed25519 key pair and its certificate.
    pub fn generate_ed25519_keypair(user_id: impl Into<String>) -> (Self, SigningKey) {
        let signing_key = SigningKey::generate(&mut rand::thread_rng());
        let cert = Self::from_ed25519(
            &signing_key.verifying_key(),
            user_id,
            crate::time::now_micros(),
        );
        (cert, signing_key)
    }

    /// Generate a certificate for a fresh Ed25519 key, discarding the secret.
    pub fn generate_ed25519(user_id: impl Into<String>) -> Self {
        Self::generate_ed25519_keypair(user_id).0
    }

    /// Set an expiry time.
    pub fn with_expiry(mut self, expires_at: u64) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Has the key expired at `now` (microseconds)?
    pub fn is_expired_at(&self, now: u64) -> bool {
        self.expires_at.is_some_and(|exp| exp <= now)
    }

    /// The key id.
    pub fn key_id(&self) -> KeyId {
        KeyId::compute(self.algo, &self.key_material)
    }
}

impl PublicCertificate for Certificate {
    fn key_id(&self) -> KeyId {
        Certificate::key_id(self)
    }

    fn nbits(&self) -> u32 {
        self.nbits
    }

    fn algo(&self) -> PubkeyAlgo {
        self.algo
    }

    fn date_string(&self) -> String {
        crate::time::micros_to_date(self.created_at)
    }

    fn user_id(&self) -> &str {
        &self.user_id
    }

    fn expires_at(&self) -> Option<u64> {
        self.expires_at
    }
}

/// Escape control characters of a user id as `\xNN` so it is safe to print
/// on a terminal.
pub fn printable_user_id(user_id: &str) -> String {
    let mut out = String::with_capacity(user_id.len());
    for c in user_id.chars() {
        if c.is_control() {
            let mut buf = [0u8; 4];
            for b in c.encode_utf8(&mut buf).bytes() {
                out.push_str(&format!("\\x{b:02x}"));
            }
        } else {
            out.push(c);
        }
    }
    out
}

mod key_material_b64 {
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&base64::engine::general_purpose::STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(d)?;
        base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map_err(serde::de::Error::custom)
    }
}
