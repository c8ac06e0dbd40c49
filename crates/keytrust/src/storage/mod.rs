//! Storage layer for certificates and trust records.
//!
//! # Directory layout
//!
//! By convention the default root is `~/.keytrust/`:
//!
//! ```text
//! ~/.keytrust/
//! ├── keys/
//! │   └── {keyid}.json
//! └── trust/
//!     └── {keyid}.json
//! ```
//!
//! # Modules
//!
//! - [`key_store`]: certificate persistence and name lookup.
//! - [`trust_db`]: trust level records.

pub mod key_store;
pub mod trust_db;

pub use key_store::KeyStore;
pub use trust_db::{FileTrustDb, TrustRecord};

/// Read `{stem}.json` filenames in `dir` and return the stems.
fn list_json_stems(dir: &std::path::Path) -> crate::error::Result<Vec<String>> {
    let mut stems = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let name_str = name.to_string_lossy();
        if let Some(stem) = name_str.strip_suffix(".json") {
            stems.push(stem.to_string());
        }
    }
    stems.sort();
    Ok(stems)
}
