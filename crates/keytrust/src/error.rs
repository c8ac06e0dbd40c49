//! Error types for keytrust.
//!
//! Per-recipient failures, the aggregate "nobody left" failure and the
//! explicitly unimplemented paths are all distinct variants so callers can
//! tell them apart. Broken collaborator contracts are not errors: they panic.

use crate::certificate::PubkeyAlgo;

/// Error type covering all recipient-list operations.
#[derive(Debug, thiserror::Error)]
pub enum RecipientError {
    #[error("public key not found: {0}")]
    NotFound(String),

    #[error("unsupported public key algorithm {algo} for '{name}'")]
    UnsupportedAlgorithm { algo: PubkeyAlgo, name: String },

    #[error("trust database error: {0}")]
    TrustDb(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("invalid trust level code: {0}")]
    InvalidTrustLevel(u8),

    #[error("no valid addressees")]
    NoValidAddressees,

    #[error("terminal input closed while waiting for an answer")]
    TerminalClosed,

    #[error("not yet implemented: {0}")]
    NotImplemented(&'static str),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid file format: {0}")]
    InvalidFileFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RecipientError {
    /// True when the operation failed because the feature is not available,
    /// as opposed to the operation itself going wrong.
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, RecipientError::NotImplemented(_))
    }
}

impl RecipientError {
    /// True when an interactive dialog lost its input and cannot continue.
    pub fn is_terminal_closed(&self) -> bool {
        matches!(self, RecipientError::TerminalClosed)
    }
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, RecipientError>;
