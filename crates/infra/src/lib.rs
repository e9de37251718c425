//! Infrastructure layer: DB, contact storage, config.

pub mod config;
pub mod contact_store;
pub mod db;
