//! Configuration values consumed by the trust policy and the stores.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{RecipientError, Result};

/// Behaviour toggles for the acceptance policy.
///
/// Passed explicitly into the decision functions; nothing reads process-wide
/// state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrustConfig {
    /// Unattended operation: never prompt.
    pub batch: bool,
    /// Answer "no" to every question: never prompt.
    pub answer_no: bool,
}

impl TrustConfig {
    /// True when the ownertrust dialog may be shown.
    pub fn interactive(&self) -> bool {
        !(self.batch || self.answer_no)
    }
}

/// Environment variable overriding the home directory.
pub const HOME_ENV: &str = "KEYTRUST_HOME";

const KEYS_DIR: &str = "keys";
const TRUST_DIR: &str = "trust";

/// On-disk layout of a keytrust home directory.
///
/// ```text
/// {home}/
/// ├── keys/
/// │   └── {keyid}.json
/// └── trust/
///     └── {keyid}.json
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeytrustPaths {
    home: PathBuf,
}

impl KeytrustPaths {
    /// Use `home` as the root directory.
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    /// Resolve the home directory from `$KEYTRUST_HOME`, falling back to
    /// `$HOME/.keytrust`.
    pub fn from_env() -> Result<Self> {
        Self::resolve(
            std::env::var_os(HOME_ENV).map(PathBuf::from),
            std::env::var_os("HOME").map(PathBuf::from),
        )
    }

    fn resolve(explicit: Option<PathBuf>, home: Option<PathBuf>) -> Result<Self> {
        match (explicit, home) {
            (Some(dir), _) if !dir.as_os_str().is_empty() => Ok(Self::new(dir)),
            (_, Some(home)) => Ok(Self::new(home.join(".keytrust"))),
            _ => Err(RecipientError::StorageError(format!(
                "neither {HOME_ENV} nor HOME is set"
            ))),
        }
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn keys_dir(&self) -> PathBuf {
        self.home.join(KEYS_DIR)
    }

    pub fn trust_dir(&self) -> PathBuf {
        self.home.join(TRUST_DIR)
    }
}
