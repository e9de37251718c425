//! Contact persistence boundary.
//!
//! This module defines the storage-facing abstraction for saving and looking
//! up contacts, plus the Postgres and in-memory implementations.

pub mod in_memory;
pub mod postgres;
pub mod r#trait;

pub use in_memory::InMemoryContactStore;
pub use postgres::PostgresContactStore;
pub use r#trait::{ContactStore, StoreError};
