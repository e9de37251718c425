use serde::Deserialize;

use contactbook_contacts::NewContact;
use contactbook_core::DomainResult;

// -------------------------
// Request DTOs
// -------------------------

/// Body of `POST /api/v1/contacts`.
///
/// Both fields are optional at the wire level so a missing field is reported
/// as a validation failure rather than a deserialization failure.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl CreateContactRequest {
    /// Validate presence of both fields and build the domain value.
    pub fn into_new_contact(self) -> DomainResult<NewContact> {
        NewContact::new(self.name.unwrap_or_default(), self.email.unwrap_or_default())
    }
}
