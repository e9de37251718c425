//! Contacts domain module.
//!
//! This crate contains the contact entity and the rules for building one from
//! user input, implemented purely as domain logic (no IO, no HTTP, no storage).

pub mod contact;

pub use contact::{Contact, NewContact};
