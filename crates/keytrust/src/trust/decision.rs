//! Acceptance policy: may this certificate be used as a recipient?
//!
//! Only `Marginal`, `Fully` and `Ultimate` grant trust; every other level
//! rejects. A key the trust database has never seen is registered first and
//! decided once more with the level it was given.
//!
//! A trust database that still reports `Unknown` or `Expired` for a key it
//! has just registered, or that cannot report on it at all, breaks its
//! contract. That is a bug in a trusted collaborator and panics.

use crate::certificate::PublicCertificate;
use crate::config::TrustConfig;
use crate::error::Result;
use crate::keyring::TrustDb;
use crate::tty::Tty;

use super::level::TrustLevel;
use super::query::{query_ownertrust, Ownertrust};

/// Outcome of the acceptance policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrustDecision {
    Accept,
    Reject(RejectReason),
}

impl TrustDecision {
    pub fn is_accept(self) -> bool {
        matches!(self, TrustDecision::Accept)
    }
}

/// Why a certificate was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// First-seen key could not be registered.
    RegistrationFailed,
    /// Expired trust; handling it is not implemented.
    ExpiredNotImplemented,
    /// Undetermined trust and prompting was not allowed.
    InsufficientInfo,
    /// Undetermined trust; the operator was asked. The answer does not
    /// grant trust in the same pass.
    OwnertrustQueried(Ownertrust),
    /// Explicitly untrusted.
    Never,
}

/// Decide whether `cert`, currently at `level`, may be used.
///
/// `Unknown` causes at most one registration and re-check; the level the
/// database reports afterwards is decided without further registration.
///
/// # Errors
///
/// Only a terminal failure during the ownertrust dialog is an error.
///
/// # Panics
///
/// When the re-check after registration fails or still reports an
/// unclassified level.
pub fn do_we_trust<C, D, T>(
    cert: &C,
    level: TrustLevel,
    trustdb: &mut D,
    tty: &mut T,
    config: &TrustConfig,
) -> Result<TrustDecision>
where
    C: PublicCertificate + ?Sized,
    D: TrustDb<C> + ?Sized,
    T: Tty + ?Sized,
{
    let level = match level {
        TrustLevel::Unknown => match register_and_recheck(cert, trustdb) {
            Some(fresh) => fresh,
            None => return Ok(TrustDecision::Reject(RejectReason::RegistrationFailed)),
        },
        other => other,
    };
    decide(cert, level, tty, config)
}

/// Insert a first-seen key and fetch the level it was given.
fn register_and_recheck<C, D>(cert: &C, trustdb: &mut D) -> Option<TrustLevel>
where
    C: PublicCertificate + ?Sized,
    D: TrustDb<C> + ?Sized,
{
    if let Err(e) = trustdb.insert_trust_record(cert) {
        log::error!("failed to insert {} into the trustdb: {e}", cert.key_id());
        return None;
    }
    let fresh = match trustdb.check_trust(cert) {
        Ok(level) => level,
        Err(e) => panic!(
            "trust check after insert failed for {}: {e}",
            cert.key_id()
        ),
    };
    if !fresh.is_classified() {
        panic!(
            "trustdb reported {fresh} for freshly inserted key {}",
            cert.key_id()
        );
    }
    log::debug!("registered {} with trust level {fresh}", cert.key_id());
    Some(fresh)
}

fn decide<C, T>(
    cert: &C,
    level: TrustLevel,
    tty: &mut T,
    config: &TrustConfig,
) -> Result<TrustDecision>
where
    C: PublicCertificate + ?Sized,
    T: Tty + ?Sized,
{
    let id = cert.key_id();
    let decision = match level {
        TrustLevel::Unknown => {
            panic!("unregistered key {id} reached the trust decision")
        }
        TrustLevel::Expired => {
            log::error!("{id}: trust has expired: not yet implemented");
            TrustDecision::Reject(RejectReason::ExpiredNotImplemented)
        }
        TrustLevel::Undefined => {
            if config.interactive() {
                let answer = query_ownertrust(cert, tty)?;
                TrustDecision::Reject(RejectReason::OwnertrustQueried(answer))
            } else {
                log::info!("{id}: no info to calculate a trust probability");
                TrustDecision::Reject(RejectReason::InsufficientInfo)
            }
        }
        TrustLevel::Never => {
            log::info!("{id}: we do NOT trust this key");
            TrustDecision::Reject(RejectReason::Never)
        }
        TrustLevel::Marginal => {
            log::info!(
                "{id}: not sure whether this key really belongs to the owner, proceeding anyway"
            );
            TrustDecision::Accept
        }
        TrustLevel::Fully => {
            log::info!("{id}: this key probably belongs to the owner");
            TrustDecision::Accept
        }
        TrustLevel::Ultimate => {
            log::info!("{id}: our own key is always good");
            TrustDecision::Accept
        }
    };
    Ok(decision)
}
