//! Trust levels.

use serde::{Deserialize, Serialize};

use crate::error::RecipientError;

/// How far the binding between a key and its owner is trusted.
///
/// The numeric codes are stable and used by [`TryFrom<u8>`]; any other code
/// is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrustLevel {
    /// Not in the trust database yet.
    Unknown,
    /// The key or its trust has expired.
    Expired,
    /// Not enough information to decide.
    Undefined,
    /// Explicitly not trusted.
    Never,
    /// Marginally trusted.
    Marginal,
    /// Fully trusted.
    Fully,
    /// One of our own keys.
    Ultimate,
}

impl TrustLevel {
    pub fn code(self) -> u8 {
        match self {
            TrustLevel::Unknown => 0,
            TrustLevel::Expired => 1,
            TrustLevel::Undefined => 2,
            TrustLevel::Never => 3,
            TrustLevel::Marginal => 4,
            TrustLevel::Fully => 5,
            TrustLevel::Ultimate => 6,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TrustLevel::Unknown => "unknown",
            TrustLevel::Expired => "expired",
            TrustLevel::Undefined => "undefined",
            TrustLevel::Never => "never",
            TrustLevel::Marginal => "marginal",
            TrustLevel::Fully => "fully",
            TrustLevel::Ultimate => "ultimate",
        }
    }

    /// Has the trust database classified the key?
    pub fn is_classified(self) -> bool {
        !matches!(self, TrustLevel::Unknown | TrustLevel::Expired)
    }
}

impl TryFrom<u8> for TrustLevel {
    type Error = RecipientError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Ok(match code {
            0 => TrustLevel::Unknown,
            1 => TrustLevel::Expired,
            2 => TrustLevel::Undefined,
            3 => TrustLevel::Never,
            4 => TrustLevel::Marginal,
            5 => TrustLevel::Fully,
            6 => TrustLevel::Ultimate,
            other => return Err(RecipientError::InvalidTrustLevel(other)),
        })
    }
}

impl std::str::FromStr for TrustLevel {
    type Err = RecipientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "unknown" => Ok(TrustLevel::Unknown),
            "expired" => Ok(TrustLevel::Expired),
            "undefined" => Ok(TrustLevel::Undefined),
            "never" => Ok(TrustLevel::Never),
            "marginal" => Ok(TrustLevel::Marginal),
            "fully" | "full" => Ok(TrustLevel::Fully),
            "ultimate" => Ok(TrustLevel::Ultimate),
            other => match other.parse::<u8>() {
                Ok(code) => TrustLevel::try_from(code),
                Err(_) => Err(RecipientError::InvalidFileFormat(format!(
                    "unknown trust level: {s}"
                ))),
            },
        }
    }
}

impl std::fmt::Display for TrustLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
