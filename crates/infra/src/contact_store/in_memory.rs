use std::sync::RwLock;

use contactbook_contacts::{Contact, NewContact};
use contactbook_core::ContactId;

use super::r#trait::{ContactStore, StoreError};

#[derive(Debug, Default)]
struct Table {
    rows: Vec<Contact>,
    last_id: i64,
}

/// In-memory contact store.
///
/// Intended for tests/dev. Identifiers are assigned sequentially from 1 and
/// rows are kept in insertion order, so the first match is the earliest save.
#[derive(Debug, Default)]
pub struct InMemoryContactStore {
    table: RwLock<Table>,
}

impl InMemoryContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored contacts.
    pub fn len(&self) -> usize {
        self.table.read().map(|t| t.rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait::async_trait]
impl ContactStore for InMemoryContactStore {
    async fn save(&self, contact: NewContact) -> Result<Contact, StoreError> {
        let mut table = self.table.write().map_err(|_| StoreError::Poisoned)?;

        table.last_id += 1;
        let stored = contact.into_contact(ContactId::from_i64(table.last_id));
        table.rows.push(stored.clone());

        Ok(stored)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Contact>, StoreError> {
        let table = self.table.read().map_err(|_| StoreError::Poisoned)?;

        Ok(table.rows.iter().find(|c| c.email() == email).cloned())
    }
}
