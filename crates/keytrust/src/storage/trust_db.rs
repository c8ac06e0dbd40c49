//! Trust record persistence.
//!
//! Stores one JSON file per key the trust database knows about:
//!
//! ```text
//! {base_dir}/
//! └── {keyid}.json
//! ```
//!
//! File format:
//! ```json
//! { "version": 1, "record": { "key_id": "...", "level": "fully", "inserted_at": 0 } }
//! ```
//!
//! Levels are assigned, not computed: a newly registered key starts out
//! `undefined` and stays there until an administrator sets it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::certificate::{KeyId, PublicCertificate};
use crate::error::{RecipientError, Result};
use crate::keyring::TrustDb;
use crate::trust::TrustLevel;

const TRUST_FILE_VERSION: u32 = 1;

/// What the trust database knows about one key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustRecord {
    pub key_id: KeyId,
    pub level: TrustLevel,
    /// Registration timestamp (microseconds since Unix epoch).
    pub inserted_at: u64,
}

#[derive(Debug, Serialize, Deserialize)]
struct TrustRecordFile {
    version: u32,
    record: TrustRecord,
}

/// Filesystem-backed trust database.
pub struct FileTrustDb {
    base_dir: PathBuf,
}

impl FileTrustDb {
    /// Open (creating if needed) a trust database rooted at `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns `RecipientError::Io` if the directory cannot be created.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        std::fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    /// The stored record for `id`, if any.
    pub fn load_record(&self, id: &KeyId) -> Result<Option<TrustRecord>> {
        let path = self.record_path(id);
        if !path.exists() {
            return Ok(None);
        }
        Self::read_record(&path).map(Some)
    }

    /// Assign `level` to `id`, registering the key if it is not known yet.
    ///
    /// `Unknown` cannot be assigned: it means "not in the database".
    pub fn set_trust_level(&self, id: &KeyId, level: TrustLevel) -> Result<()> {
        if level == TrustLevel::Unknown {
            return Err(RecipientError::TrustDb(
                "'unknown' cannot be assigned".to_string(),
            ));
        }
        let inserted_at = match self.load_record(id)? {
            Some(existing) => existing.inserted_at,
            None => crate::time::now_micros(),
        };
        self.write_record(&TrustRecord {
            key_id: *id,
            level,
            inserted_at,
        })?;
        log::debug!("trust level of {id} set to {level}");
        Ok(())
    }

    /// All records, ordered by key id.
    pub fn list(&self) -> Result<Vec<TrustRecord>> {
        let mut records = Vec::new();
        for stem in super::list_json_stems(&self.base_dir)? {
            records.push(Self::read_record(
                &self.base_dir.join(format!("{stem}.json")),
            )?);
        }
        records.sort_by_key(|r| r.key_id);
        Ok(records)
    }

    fn write_record(&self, record: &TrustRecord) -> Result<()> {
        let file = TrustRecordFile {
            version: TRUST_FILE_VERSION,
            record: record.clone(),
        };
        let json = serde_json::to_string_pretty(&file)
            .map_err(|e| RecipientError::SerializationError(e.to_string()))?;
        std::fs::write(self.record_path(&record.key_id), json.as_bytes())?;
        Ok(())
    }

    fn read_record(path: &Path) -> Result<TrustRecord> {
        let bytes = std::fs::read(path)?;
        let file: TrustRecordFile = serde_json::from_slice(&bytes).map_err(|e| {
            RecipientError::InvalidFileFormat(format!(
                "failed to parse trust record {}: {e}",
                path.display()
            ))
        })?;
        Ok(file.record)
    }

    fn record_path(&self, id: &KeyId) -> PathBuf {
        self.base_dir.join(format!("{}.json", id.long()))
    }
}

fn is_expired<C: PublicCertificate + ?Sized>(cert: &C) -> bool {
    cert.expires_at()
        .is_some_and(|exp| exp <= crate::time::now_micros())
}

impl<C: PublicCertificate + ?Sized> TrustDb<C> for FileTrustDb {
    fn check_trust(&mut self, cert: &C) -> Result<TrustLevel> {
        let record = self
            .load_record(&cert.key_id())
            .map_err(|e| RecipientError::TrustDb(e.to_string()))?;
        Ok(match record {
            None => TrustLevel::Unknown,
            Some(_) if is_expired(cert) => TrustLevel::Expired,
            Some(record) => record.level,
        })
    }

    fn insert_trust_record(&mut self, cert: &C) -> Result<()> {
        let id = cert.key_id();
        if is_expired(cert) {
            return Err(RecipientError::TrustDb(format!("key {id} has expired")));
        }
        if self.record_path(&id).exists() {
            return Err(RecipientError::TrustDb(format!(
                "key {id} is already in the trust database"
            )));
        }
        self.write_record(&TrustRecord {
            key_id: id,
            level: TrustLevel::Undefined,
            inserted_at: crate::time::now_micros(),
        })?;
        log::info!("key {id} inserted into the trust database");
        Ok(())
    }
}
