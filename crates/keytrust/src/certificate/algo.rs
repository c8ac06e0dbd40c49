//! Public key algorithm identifiers.
//!
//! Numeric codes follow the OpenPGP registry so that certificates imported
//! from other tools keep their meaning.

use serde::{Deserialize, Serialize};

use crate::error::{RecipientError, Result};

/// Public key algorithm of a certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum PubkeyAlgo {
    Rsa,
    ElGamal,
    Dsa,
    Ed25519,
    Other(u8),
}

impl PubkeyAlgo {
    /// Registry code.
    pub fn id(self) -> u8 {
        match self {
            PubkeyAlgo::Rsa => 1,
            PubkeyAlgo::ElGamal => 16,
            PubkeyAlgo::Dsa => 17,
            PubkeyAlgo::Ed25519 => 22,
            PubkeyAlgo::Other(id) => id,
        }
    }

    /// Single-letter tag used in key listings.
    pub fn letter(self) -> char {
        match self {
            PubkeyAlgo::Rsa => 'R',
            PubkeyAlgo::ElGamal => 'G',
            PubkeyAlgo::Dsa => 'D',
            PubkeyAlgo::Ed25519 => 'E',
            PubkeyAlgo::Other(_) => '?',
        }
    }

    /// Human-readable name.
    pub fn as_str(self) -> &'static str {
        match self {
            PubkeyAlgo::Rsa => "RSA",
            PubkeyAlgo::ElGamal => "ElGamal",
            PubkeyAlgo::Dsa => "DSA",
            PubkeyAlgo::Ed25519 => "Ed25519",
            PubkeyAlgo::Other(_) => "unknown",
        }
    }

    /// Can a message be addressed to a key of this algorithm?
    pub fn usable_for_recipient(self) -> bool {
        matches!(
            self,
            PubkeyAlgo::Rsa | PubkeyAlgo::ElGamal | PubkeyAlgo::Ed25519
        )
    }
}

impl From<u8> for PubkeyAlgo {
    fn from(id: u8) -> Self {
        match id {
            1 => PubkeyAlgo::Rsa,
            16 => PubkeyAlgo::ElGamal,
            17 => PubkeyAlgo::Dsa,
            22 => PubkeyAlgo::Ed25519,
            other => PubkeyAlgo::Other(other),
        }
    }
}

impl From<PubkeyAlgo> for u8 {
    fn from(algo: PubkeyAlgo) -> Self {
        algo.id()
    }
}

impl std::fmt::Display for PubkeyAlgo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PubkeyAlgo::Other(id) => write!(f, "algorithm {id}"),
            known => f.write_str(known.as_str()),
        }
    }
}

/// Reject algorithms a recipient key cannot use.
///
/// DSA is signature-only and unknown codes are never accepted.
pub fn check_pubkey_algo(algo: PubkeyAlgo, name: &str) -> Result<()> {
    if algo.usable_for_recipient() {
        Ok(())
    } else {
        Err(RecipientError::UnsupportedAlgorithm {
            algo,
            name: name.to_string(),
        })
    }
}
