//! Certificate persistence.
//!
//! Stores one JSON file per certificate, named by its long key id:
//!
//! ```text
//! {base_dir}/
//! └── {keyid}.json
//! ```
//!
//! File format:
//! ```json
//! { "version": 1, "certificate": { ... Certificate ... } }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::certificate::{name_matches, Certificate, KeyId};
use crate::error::{RecipientError, Result};
use crate::keyring::KeyDirectory;

const KEY_FILE_VERSION: u32 = 1;

/// Wrapper written to disk for each certificate.
#[derive(Debug, Serialize, Deserialize)]
struct CertificateFile {
    version: u32,
    certificate: Certificate,
}

/// Filesystem-backed certificate store.
pub struct KeyStore {
    base_dir: PathBuf,
}

impl KeyStore {
    /// Open (creating if needed) a store rooted at `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns `RecipientError::Io` if the directory cannot be created.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        std::fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    /// Persist `cert`, replacing any stored copy with the same key id.
    ///
    /// # Errors
    ///
    /// Returns `RecipientError::SerializationError` if serialization fails, or
    /// `RecipientError::Io` for filesystem errors.
    pub fn save(&self, cert: &Certificate) -> Result<KeyId> {
        let id = cert.key_id();
        let file = CertificateFile {
            version: KEY_FILE_VERSION,
            certificate: cert.clone(),
        };
        let json = serde_json::to_string_pretty(&file)
            .map_err(|e| RecipientError::SerializationError(e.to_string()))?;
        std::fs::write(self.cert_path(&id), json.as_bytes())?;
        log::debug!("stored certificate {} for '{}'", id, cert.user_id);
        Ok(id)
    }

    /// Load a certificate by key id.
    ///
    /// # Errors
    ///
    /// Returns `RecipientError::NotFound` if no such certificate is stored,
    /// `RecipientError::InvalidFileFormat` for malformed files.
    pub fn load(&self, id: &KeyId) -> Result<Certificate> {
        let path = self.cert_path(id);
        if !path.exists() {
            return Err(RecipientError::NotFound(format!("certificate {}", id.long())));
        }
        Self::read_cert(&path)
    }

    /// Import a certificate from a JSON file, either a bare certificate or a
    /// store file.
    pub fn import_file(&self, path: &Path) -> Result<KeyId> {
        let bytes = std::fs::read(path)?;
        let cert = match serde_json::from_slice::<CertificateFile>(&bytes) {
            Ok(file) => file.certificate,
            Err(_) => serde_json::from_slice::<Certificate>(&bytes).map_err(|e| {
                RecipientError::InvalidFileFormat(format!(
                    "{} is not a certificate: {e}",
                    path.display()
                ))
            })?,
        };
        self.save(&cert)
    }

    /// All stored certificates, ordered by key id.
    pub fn list(&self) -> Result<Vec<Certificate>> {
        let mut certs = Vec::new();
        for stem in super::list_json_stems(&self.base_dir)? {
            certs.push(Self::read_cert(&self.base_dir.join(format!("{stem}.json")))?);
        }
        certs.sort_by_key(|c| c.key_id());
        Ok(certs)
    }

    /// First certificate, in key id order, selected by `name`.
    ///
    /// See [`name_matches`] for how names select keys. Files that cannot be
    /// read are logged and passed over, so one bad entry does not hide the
    /// rest of the store.
    pub fn find_by_name(&self, name: &str) -> Result<Certificate> {
        let mut matches = Vec::new();
        for stem in super::list_json_stems(&self.base_dir)? {
            let path = self.base_dir.join(format!("{stem}.json"));
            match Self::read_cert(&path) {
                Ok(cert) if name_matches(&cert, name) => matches.push(cert),
                Ok(_) => {}
                Err(e) => log::warn!("ignoring unreadable key file: {e}"),
            }
        }
        matches
            .into_iter()
            .min_by_key(|c| c.key_id())
            .ok_or_else(|| RecipientError::NotFound(name.to_string()))
    }

    fn read_cert(path: &Path) -> Result<Certificate> {
        let bytes = std::fs::read(path)?;
        let file: CertificateFile = serde_json::from_slice(&bytes).map_err(|e| {
            RecipientError::InvalidFileFormat(format!(
                "failed to parse certificate file {}: {e}",
                path.display()
            ))
        })?;
        Ok(file.certificate)
    }

    fn cert_path(&self, id: &KeyId) -> PathBuf {
        self.base_dir.join(format!("{}.json", id.long()))
    }
}

impl KeyDirectory for KeyStore {
    type Certificate = Certificate;

    fn get_pubkey_byname(&mut self, name: &str) -> Result<Certificate> {
        self.find_by_name(name)
    }
}
