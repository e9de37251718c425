use std::sync::Arc;

use thiserror::Error;

use contactbook_contacts::{Contact, NewContact};

/// Contact store operation error.
///
/// These are **infrastructure errors** (connectivity, statement execution,
/// row mapping) as opposed to domain errors (validation). None of them are
/// retried; callers surface them on the same request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached (pool closed, IO failure, acquire timeout).
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The database rejected or failed to execute a statement.
    #[error("query failed: {0}")]
    Query(String),

    /// A returned row could not be mapped to a contact.
    #[error("failed to decode row: {0}")]
    Decode(String),

    /// In-memory store lock was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    Poisoned,
}

/// Persistence for contacts.
///
/// Implementations must bind every value as a statement parameter; only the
/// fixed table name may appear literally in statement text.
#[async_trait::async_trait]
pub trait ContactStore: Send + Sync {
    /// Insert a contact and return it with the store-assigned identifier.
    async fn save(&self, contact: NewContact) -> Result<Contact, StoreError>;

    /// Look up a contact by exact email match.
    ///
    /// Emails are not unique: when several rows match, the earliest saved one
    /// (lowest identifier) is returned.
    async fn find_by_email(&self, email: &str) -> Result<Option<Contact>, StoreError>;
}

#[async_trait::async_trait]
impl<S> ContactStore for Arc<S>
where
    S: ContactStore + ?Sized,
{
    async fn save(&self, contact: NewContact) -> Result<Contact, StoreError> {
        (**self).save(contact).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Contact>, StoreError> {
        (**self).find_by_email(email).await
    }
}
