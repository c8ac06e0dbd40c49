//! Ownertrust dialog.
//!
//! Asks the operator how far the owner of a key is trusted to certify other
//! keys. The dialog has no default and no timeout: it only returns once one
//! of the four answers has been given, or the terminal closes.

use crate::certificate::{printable_user_id, PublicCertificate};
use crate::error::Result;
use crate::tty::Tty;

/// An operator's judgment of a key owner's care when certifying keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ownertrust {
    DontKnow,
    Never,
    Marginal,
    Fully,
}

impl Ownertrust {
    /// Map a menu answer (`1`..=`4`).
    pub fn from_choice(c: char) -> Option<Self> {
        match c {
            '1' => Some(Ownertrust::DontKnow),
            '2' => Some(Ownertrust::Never),
            '3' => Some(Ownertrust::Marginal),
            '4' => Some(Ownertrust::Fully),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Ownertrust::DontKnow => "don't know",
            Ownertrust::Never => "do not trust",
            Ownertrust::Marginal => "trust marginally",
            Ownertrust::Fully => "trust fully",
        }
    }
}

const PROMPT: &str = "Your decision? ";

const MENU: &str = "\
Please decide how far you trust this user to correctly
verify other users' keys (by looking at passports,
checking fingerprints from different sources...)?

 1 = Don't know
 2 = I do NOT trust
 3 = I trust marginally
 4 = I trust fully
 s = please show me more information

";

const HELP_OWNERTRUST: &str = "\
It's up to you to assign a value here; this value will never be exported
to any third party. It is needed to implement the web-of-trust; it has
nothing to do with the (implicitly created) web-of-certificates.
";

const MORE_INFO: &str = "You will see a list of signators etc. here\n";

/// Run the ownertrust dialog for `cert`.
///
/// The answer is returned to the caller; storing it is not done here.
///
/// # Errors
///
/// Whatever the terminal reports when it can no longer be read.
pub fn query_ownertrust<C, T>(cert: &C, tty: &mut T) -> Result<Ownertrust>
where
    C: PublicCertificate + ?Sized,
    T: Tty + ?Sized,
{
    tty.print(&format!(
        "No ownertrust specified for:\n{:4}{}/{} {} \"{}\"\n\n",
        cert.nbits(),
        cert.algo().letter(),
        cert.key_id(),
        cert.date_string(),
        printable_user_id(cert.user_id()),
    ));
    tty.print(MENU);

    loop {
        let line = tty.read_line(PROMPT)?;
        let answer = line.trim();
        tty.kill_prompt();

        let mut chars = answer.chars();
        let first = chars.next();
        if chars.next().is_some() {
            continue;
        }
        match first {
            Some('?') => tty.print(HELP_OWNERTRUST),
            Some('s') | Some('S') => tty.print(MORE_INFO),
            Some(c) => {
                if let Some(choice) = Ownertrust::from_choice(c) {
                    log::debug!("ownertrust for {}: {}", cert.key_id(), choice.as_str());
                    return Ok(choice);
                }
            }
            None => {}
        }
    }
}
