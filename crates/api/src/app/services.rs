//! Service layer and infrastructure wiring (store selection, pool ownership).

use std::sync::Arc;

use sqlx::PgPool;

use contactbook_contacts::{Contact, NewContact};
use contactbook_infra::{
    config::AppConfig,
    contact_store::{ContactStore, InMemoryContactStore, PostgresContactStore, StoreError},
    db,
};

/// Orchestrates contact operations on top of an injected store.
///
/// Holds no mutable state of its own; cloning shares the same store handle.
#[derive(Clone)]
pub struct ContactService {
    store: Arc<dyn ContactStore>,
}

impl ContactService {
    pub fn new(store: Arc<dyn ContactStore>) -> Self {
        Self { store }
    }

    /// Persist a validated contact and return it as stored (with its id).
    pub async fn save(&self, contact: NewContact) -> Result<Contact, StoreError> {
        tracing::debug!("saving contact");
        self.store.save(contact).await
    }

    /// Look up the earliest contact saved with exactly this email.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Contact>, StoreError> {
        tracing::debug!("looking up contact by email");
        self.store.find_by_email(email).await
    }
}

/// Everything the HTTP layer needs, built once at startup.
#[derive(Clone)]
pub struct AppServices {
    contacts: ContactService,
    pool: Option<PgPool>,
}

impl AppServices {
    /// Services over an arbitrary store (no pool to manage).
    pub fn with_store(store: Arc<dyn ContactStore>) -> Self {
        Self {
            contacts: ContactService::new(store),
            pool: None,
        }
    }

    /// In-memory wiring (dev/test).
    pub fn in_memory() -> Self {
        Self::with_store(Arc::new(InMemoryContactStore::new()))
    }

    /// Postgres wiring: the pool is owned here and closed by [`AppServices::shutdown`].
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            contacts: ContactService::new(Arc::new(PostgresContactStore::new(pool.clone()))),
            pool: Some(pool),
        }
    }

    pub fn contacts(&self) -> &ContactService {
        &self.contacts
    }

    /// Release external resources (closes the connection pool, if any).
    pub async fn shutdown(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
            tracing::info!("postgres pool closed");
        }
    }
}

/// Build services from configuration.
///
/// Without `DATABASE_URL` the service runs on the in-memory store.
pub async fn build_services(config: &AppConfig) -> anyhow::Result<AppServices> {
    match &config.database {
        Some(db_config) => {
            let pool = db::connect(db_config).await?;
            if db_config.bootstrap_schema {
                db::bootstrap_schema(&pool).await?;
            }
            Ok(AppServices::postgres(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory contact store (data is lost on exit)");
            Ok(AppServices::in_memory())
        }
    }
}
