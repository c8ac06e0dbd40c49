//! Collaborator contracts: where certificates and trust levels come from.
//!
//! The recipient builder only talks to these traits. [`KeyStore`] and
//! [`FileTrustDb`] are the persistent implementations; the in-memory ones
//! here serve embedders that keep their keyring elsewhere, and tests.
//!
//! [`KeyStore`]: crate::storage::KeyStore
//! [`FileTrustDb`]: crate::storage::FileTrustDb

use std::collections::HashMap;

use crate::certificate::{check_pubkey_algo, name_matches, Certificate, KeyId, PublicCertificate};
use crate::error::{RecipientError, Result};
use crate::trust::TrustLevel;

/// Resolves identity names to certificates.
pub trait KeyDirectory {
    type Certificate: PublicCertificate;

    /// Look up the certificate selected by `name`. The caller owns the
    /// returned value.
    fn get_pubkey_byname(&mut self, name: &str) -> Result<Self::Certificate>;

    /// Reject certificates whose algorithm cannot be used for a recipient.
    fn check_pubkey_algo(&self, cert: &Self::Certificate) -> Result<()> {
        check_pubkey_algo(cert.algo(), cert.user_id())
    }
}

/// Stores and reports trust levels.
pub trait TrustDb<C: PublicCertificate + ?Sized> {
    /// Current trust level of `cert`. A key the database has never seen is
    /// `Unknown`.
    fn check_trust(&mut self, cert: &C) -> Result<TrustLevel>;

    /// Register a first-seen key. Afterwards `check_trust` must report a
    /// classified level (neither `Unknown` nor `Expired`).
    fn insert_trust_record(&mut self, cert: &C) -> Result<()>;
}

/// In-memory key directory.
#[derive(Debug, Default)]
pub struct MemoryKeyDirectory {
    certs: Vec<Certificate>,
}

impl MemoryKeyDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, cert: Certificate) -> KeyId {
        let id = cert.key_id();
        self.certs.push(cert);
        id
    }

    pub fn len(&self) -> usize {
        self.certs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.certs.is_empty()
    }
}

impl KeyDirectory for MemoryKeyDirectory {
    type Certificate = Certificate;

    fn get_pubkey_byname(&mut self, name: &str) -> Result<Certificate> {
        self.certs
            .iter()
            .find(|c| name_matches(*c, name))
            .cloned()
            .ok_or_else(|| RecipientError::NotFound(name.to_string()))
    }
}

/// In-memory trust database keyed by key id.
#[derive(Debug)]
pub struct MemoryTrustDb {
    levels: HashMap<KeyId, TrustLevel>,
    registered_level: TrustLevel,
}

impl Default for MemoryTrustDb {
    fn default() -> Self {
        Self {
            levels: HashMap::new(),
            registered_level: TrustLevel::Undefined,
        }
    }
}

impl MemoryTrustDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Level assigned to keys registered through `insert_trust_record`.
    /// Defaults to `Undefined`.
    pub fn with_registered_level(mut self, level: TrustLevel) -> Self {
        self.registered_level = level;
        self
    }

    pub fn set_level(&mut self, id: KeyId, level: TrustLevel) {
        self.levels.insert(id, level);
    }

    pub fn level(&self, id: &KeyId) -> Option<TrustLevel> {
        self.levels.get(id).copied()
    }
}

impl<C: PublicCertificate + ?Sized> TrustDb<C> for MemoryTrustDb {
    fn check_trust(&mut self, cert: &C) -> Result<TrustLevel> {
        Ok(self
            .levels
            .get(&cert.key_id())
            .copied()
            .unwrap_or(TrustLevel::Unknown))
    }

    fn insert_trust_record(&mut self, cert: &C) -> Result<()> {
        let id = cert.key_id();
        if self.levels.contains_key(&id) {
            return Err(RecipientError::TrustDb(format!(
                "key {id} is already in the trust database"
            )));
        }
        self.levels.insert(id, self.registered_level);
        Ok(())
    }
}
