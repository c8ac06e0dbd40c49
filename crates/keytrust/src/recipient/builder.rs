//! Building a recipient list from the names a message is addressed to.
//!
//! Every name is handled on its own: a name that cannot be resolved, has an
//! unusable algorithm or cannot be looked up in the trust database is
//! skipped and reported, and the rest of the batch carries on. A key the
//! policy rejects is dropped without an error. The build as a whole fails
//! when nobody is left, or when the terminal closes in the middle of a
//! dialog.

use crate::config::TrustConfig;
use crate::error::{RecipientError, Result};
use crate::keyring::{KeyDirectory, TrustDb};
use crate::trust::{do_we_trust, RejectReason, TrustDecision};
use crate::tty::Tty;

use super::list::RecipientList;

/// A name that could not be processed, with the reason.
#[derive(Debug)]
pub struct SkippedRecipient {
    pub name: String,
    pub error: RecipientError,
}

/// Resolves names, applies the trust policy and collects accepted
/// certificates.
///
/// After a build, [`skipped`](Self::skipped) and
/// [`rejected`](Self::rejected) describe what happened to the names that did
/// not make it into the list.
pub struct RecipientListBuilder<'a, D, T, Y>
where
    D: KeyDirectory,
    T: TrustDb<D::Certificate> + ?Sized,
    Y: Tty + ?Sized,
{
    directory: &'a mut D,
    trustdb: &'a mut T,
    tty: &'a mut Y,
    config: TrustConfig,
    skipped: Vec<SkippedRecipient>,
    rejected: Vec<(String, RejectReason)>,
}

impl<'a, D, T, Y> RecipientListBuilder<'a, D, T, Y>
where
    D: KeyDirectory,
    T: TrustDb<D::Certificate> + ?Sized,
    Y: Tty + ?Sized,
{
    pub fn new(
        directory: &'a mut D,
        trustdb: &'a mut T,
        tty: &'a mut Y,
        config: &TrustConfig,
    ) -> Self {
        Self {
            directory,
            trustdb,
            tty,
            config: *config,
            skipped: Vec::new(),
            rejected: Vec::new(),
        }
    }

    /// Build the list for `names`, processed strictly in order.
    ///
    /// # Errors
    ///
    /// - `NotImplemented` if `names` is empty (asking for recipients
    ///   interactively is not available).
    /// - `NoValidAddressees` if no certificate was accepted.
    /// - `TerminalClosed` (or `Io`) if an ownertrust dialog lost its input;
    ///   certificates accepted so far are released.
    pub fn build<S: AsRef<str>>(
        &mut self,
        names: &[S],
    ) -> Result<RecipientList<D::Certificate>> {
        self.skipped.clear();
        self.rejected.clear();

        if names.is_empty() {
            log::error!("asking for recipients is not yet implemented");
            return Err(RecipientError::NotImplemented(
                "asking for recipients interactively",
            ));
        }

        let mut list = RecipientList::new();
        for name in names {
            self.add_recipient(name.as_ref(), &mut list)?;
        }

        if list.is_empty() {
            log::error!("no valid addressees");
            list.release();
            return Err(RecipientError::NoValidAddressees);
        }
        Ok(list)
    }

    /// Names skipped because of an error during the last build.
    pub fn skipped(&self) -> &[SkippedRecipient] {
        &self.skipped
    }

    /// Names whose key the trust policy rejected during the last build.
    pub fn rejected(&self) -> &[(String, RejectReason)] {
        &self.rejected
    }

    fn add_recipient(
        &mut self,
        name: &str,
        list: &mut RecipientList<D::Certificate>,
    ) -> Result<()> {
        let cert = match self.directory.get_pubkey_byname(name) {
            Ok(cert) => cert,
            Err(e) => {
                self.skip(name, e);
                return Ok(());
            }
        };

        if let Err(e) = self.directory.check_pubkey_algo(&cert) {
            self.skip(name, e);
            return Ok(());
        }

        let level = match self.trustdb.check_trust(&cert) {
            Ok(level) => level,
            Err(e) => {
                log::error!("error checking key of '{name}': {e}");
                self.skipped.push(SkippedRecipient {
                    name: name.to_string(),
                    error: e,
                });
                return Ok(());
            }
        };

        match do_we_trust(
            &cert,
            level,
            &mut *self.trustdb,
            &mut *self.tty,
            &self.config,
        )? {
            TrustDecision::Accept => list.push_front(cert),
            TrustDecision::Reject(reason) => {
                log::debug!("'{name}' not used: {reason:?}");
                self.rejected.push((name.to_string(), reason));
            }
        }
        Ok(())
    }

    fn skip(&mut self, name: &str, error: RecipientError) {
        log::error!("skipped '{name}': {error}");
        self.skipped.push(SkippedRecipient {
            name: name.to_string(),
            error,
        });
    }
}

/// Build a recipient list in one call.
///
/// See [`RecipientListBuilder::build`] for the failure cases.
pub fn build_recipient_list<D, T, Y, S>(
    directory: &mut D,
    trustdb: &mut T,
    tty: &mut Y,
    config: &TrustConfig,
    names: &[S],
) -> Result<RecipientList<D::Certificate>>
where
    D: KeyDirectory,
    T: TrustDb<D::Certificate> + ?Sized,
    Y: Tty + ?Sized,
    S: AsRef<str>,
{
    RecipientListBuilder::new(directory, trustdb, tty, config).build(names)
}
