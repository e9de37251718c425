use serde::{Deserialize, Serialize};

use contactbook_core::{ContactId, DomainError, DomainResult, Entity};

/// A validated contact that has not been persisted yet (no identifier).
///
/// The only way to obtain one is [`NewContact::new`], so every value of this
/// type carries a non-blank name and email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    name: String,
    email: String,
}

impl NewContact {
    /// Build a contact from raw input fields.
    ///
    /// Values are kept exactly as supplied; blankness is checked on the
    /// trimmed value.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        let email = email.into();

        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if email.trim().is_empty() {
            return Err(DomainError::validation("email cannot be empty"));
        }

        Ok(Self { name, email })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Attach the store-assigned identifier.
    pub fn into_contact(self, id: ContactId) -> Contact {
        Contact {
            id,
            name: self.name,
            email: self.email,
        }
    }
}

/// Entity: a persisted contact.
///
/// Created once by the contact service and never updated or deleted by this
/// system. JSON shape is `{"id": int, "name": string, "email": string}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    id: ContactId,
    name: String,
    email: String,
}

impl Contact {
    /// Rehydrate a contact from stored columns.
    ///
    /// Rows are trusted: they could only have been written through
    /// [`NewContact`].
    pub fn restore(id: ContactId, name: String, email: String) -> Self {
        Self { id, name, email }
    }

    pub fn id_typed(&self) -> ContactId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

impl Entity for Contact {
    type Id = ContactId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_contact_keeps_fields_as_given() {
        let contact = NewContact::new(" Ann ", "ann@x.com").unwrap();
        assert_eq!(contact.name(), " Ann ");
        assert_eq!(contact.email(), "ann@x.com");
    }

    #[test]
    fn new_contact_rejects_empty_name() {
        let err = NewContact::new("", "ann@x.com").unwrap_err();
        assert_eq!(err, DomainError::validation("name cannot be empty"));
    }

    #[test]
    fn new_contact_rejects_whitespace_name() {
        let err = NewContact::new("   ", "ann@x.com").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn new_contact_rejects_empty_email() {
        let err = NewContact::new("Ann", "").unwrap_err();
        assert_eq!(err, DomainError::validation("email cannot be empty"));
    }

    #[test]
    fn into_contact_attaches_id() {
        let contact = NewContact::new("Ann", "ann@x.com")
            .unwrap()
            .into_contact(ContactId::from_i64(3));

        assert_eq!(*contact.id(), ContactId::from_i64(3));
        assert_eq!(contact.name(), "Ann");
        assert_eq!(contact.email(), "ann@x.com");
    }

    #[test]
    fn contact_serializes_to_wire_shape() {
        let contact = Contact::restore(ContactId::from_i64(1), "Ann".into(), "ann@x.com".into());
        let json = serde_json::to_value(&contact).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "id": 1, "name": "Ann", "email": "ann@x.com" })
        );
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: any pair with a visible character in both fields is accepted unchanged.
            #[test]
            fn accepts_all_non_blank_pairs(
                name in "[ ]{0,3}[A-Za-z][A-Za-z0-9 .'-]{0,40}",
                email in "[a-z0-9._]{1,20}@[a-z0-9]{1,10}\\.[a-z]{2,4}"
            ) {
                let contact = NewContact::new(name.clone(), email.clone()).unwrap();
                prop_assert_eq!(contact.name(), name.as_str());
                prop_assert_eq!(contact.email(), email.as_str());
            }

            /// Property: blank names are rejected regardless of the email.
            #[test]
            fn rejects_blank_names(
                name in "[ \t\n]{0,8}",
                email in "[a-z]{1,10}@x\\.com"
            ) {
                let err = NewContact::new(name, email).unwrap_err();
                prop_assert!(err.is_validation());
            }
        }
    }
}
