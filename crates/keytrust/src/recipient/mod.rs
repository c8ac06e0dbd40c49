//! Recipient lists: the certificates a message will be protected for.

pub mod builder;
pub mod list;

pub use builder::{build_recipient_list, RecipientListBuilder, SkippedRecipient};
pub use list::{release_recipient_list, RecipientList, RecipientNode};
