//! Postgres-backed contact store.
//!
//! ## Error Mapping
//!
//! | SQLx Error | StoreError |
//! |------------|------------|
//! | Database (any SQLSTATE) | `Query` |
//! | PoolClosed / PoolTimedOut / Io / Tls | `Unavailable` |
//! | ColumnDecode / ColumnNotFound / Decode | `Decode` |
//! | Other | `Query` |
//!
//! ## Thread Safety
//!
//! `PostgresContactStore` is `Send + Sync` and cheap to clone; all operations go
//! through the SQLx connection pool.

use std::sync::Arc;

use sqlx::{PgPool, Row};
use tracing::instrument;

use contactbook_contacts::{Contact, NewContact};
use contactbook_core::ContactId;

use super::r#trait::{ContactStore, StoreError};

/// Postgres-backed contact store.
///
/// Every statement binds its values (`$1`, `$2`); the table name is the only
/// literal. `"Id"` is cast to `BIGINT` on the way out so tables created with an
/// `INTEGER` identity column decode the same way.
#[derive(Debug, Clone)]
pub struct PostgresContactStore {
    pool: Arc<PgPool>,
}

impl PostgresContactStore {
    /// Create a new store over an already-connected pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Insert one contact and read back the generated identifier.
    #[instrument(skip(self, contact), fields(operation = "insert_contact"), err)]
    pub async fn insert(&self, contact: NewContact) -> Result<Contact, StoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO "Contacts" ("Name", "Email")
            VALUES ($1, $2)
            RETURNING "Id"::BIGINT AS id
            "#,
        )
        .bind(contact.name())
        .bind(contact.email())
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_contact", e))?;

        let id: i64 = row
            .try_get("id")
            .map_err(|e| map_sqlx_error("insert_contact", e))?;

        tracing::debug!(contact_id = id, "contact inserted");
        Ok(contact.into_contact(ContactId::from_i64(id)))
    }

    /// Select the earliest contact with exactly this email.
    #[instrument(skip(self, email), fields(operation = "find_contact_by_email"), err)]
    pub async fn fetch_first_by_email(&self, email: &str) -> Result<Option<Contact>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT
                "Id"::BIGINT AS id,
                "Name" AS name,
                "Email" AS email
            FROM "Contacts"
            WHERE "Email" = $1
            ORDER BY "Id" ASC
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_contact_by_email", e))?;

        match row {
            Some(row) => {
                let row = <ContactRow as sqlx::FromRow<_>>::from_row(&row)
                    .map_err(|e| map_sqlx_error("find_contact_by_email", e))?;
                Ok(Some(row.into()))
            }
            None => Ok(None),
        }
    }
}

#[async_trait::async_trait]
impl ContactStore for PostgresContactStore {
    async fn save(&self, contact: NewContact) -> Result<Contact, StoreError> {
        self.insert(contact).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Contact>, StoreError> {
        self.fetch_first_by_email(email).await
    }
}

/// Map SQLx errors to store errors.
fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let code = db_err
                .code()
                .map(|c| c.into_owned())
                .unwrap_or_else(|| "?????".to_string());
            StoreError::Query(format!(
                "database error in {} (sqlstate {}): {}",
                operation,
                code,
                db_err.message()
            ))
        }
        sqlx::Error::PoolClosed => {
            StoreError::Unavailable(format!("connection pool closed in {}", operation))
        }
        sqlx::Error::PoolTimedOut => {
            StoreError::Unavailable(format!("timed out acquiring connection in {}", operation))
        }
        sqlx::Error::Io(e) => StoreError::Unavailable(format!("io error in {}: {}", operation, e)),
        sqlx::Error::Tls(e) => StoreError::Unavailable(format!("tls error in {}: {}", operation, e)),
        sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::Decode(_) => {
            StoreError::Decode(format!("{} in {}", err, operation))
        }
        _ => StoreError::Query(format!("sqlx error in {}: {}", operation, err)),
    }
}

#[derive(Debug)]
struct ContactRow {
    id: i64,
    name: String,
    email: String,
}

impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for ContactRow {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        Ok(ContactRow {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
        })
    }
}

impl From<ContactRow> for Contact {
    fn from(row: ContactRow) -> Self {
        Contact::restore(ContactId::from_i64(row.id), row.name, row.email)
    }
}
