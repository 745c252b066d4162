//! Contact model.

use crate::domain::ContactId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single entry in the directory.
///
/// All descriptive fields are free-text strings and default to empty; no
/// validation happens at this layer. Group membership is an ordered list of
/// group names that callers keep free of duplicates (the Directory's
/// `assign_group` is the deduplicating entry point).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    /// Unique identifier, immutable after construction
    id: ContactId,

    /// Full name
    pub name: String,

    /// Phone number
    pub phone: String,

    /// Email address
    pub email: String,

    /// Company/organization; empty means "none"
    pub company: String,

    /// Free-text notes
    pub notes: String,

    /// Names of the groups this contact belongs to
    pub groups: Vec<String>,
}

/// Descriptive fields for creating or updating a contact, without an id.
///
/// `Directory::add_contact` pairs these with a freshly generated id;
/// `Directory::update_contact` applies the non-empty ones to an existing
/// contact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub company: String,
    pub notes: String,
}

impl Contact {
    /// Construct a contact from its parts. No field validation.
    pub fn new(id: ContactId, fields: ContactFields, groups: Vec<String>) -> Self {
        Self {
            id,
            name: fields.name,
            phone: fields.phone,
            email: fields.email,
            company: fields.company,
            notes: fields.notes,
            groups,
        }
    }

    /// The contact's identifier.
    pub fn id(&self) -> &ContactId {
        &self.id
    }

    /// Append a group name to this contact's membership list.
    ///
    /// Side effect on the contact only; the caller keeps the Directory's
    /// group index in sync and avoids duplicates.
    pub fn add_group(&mut self, group: impl Into<String>) {
        self.groups.push(group.into());
    }

    /// Remove the first occurrence of a group name from the membership list.
    ///
    /// Returns `true` if an entry was removed, `false` if the contact was not
    /// a member. A missing group is a no-op, never a panic; the Directory
    /// layer reports the same outcome through `GroupChange::NotMember`.
    pub fn remove_group(&mut self, group: &str) -> bool {
        match self.groups.iter().position(|g| g == group) {
            Some(idx) => {
                self.groups.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Whether this contact is a member of the named group.
    pub fn in_group(&self, group: &str) -> bool {
        self.groups.iter().any(|g| g == group)
    }
}

/// Canonical short display form: `name (phone)`.
impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.phone)
    }
}

/// Flat record shape used by `bulk_import`/`bulk_export` and the persisted
/// JSON document. Derived-index data (companies, group member lists) is never
/// part of a record; indexes are always rebuilt from contacts.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ContactRecord {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub company: String,
    pub notes: String,
    pub groups: Vec<String>,
}

impl From<&Contact> for ContactRecord {
    fn from(contact: &Contact) -> Self {
        Self {
            id: contact.id().as_str().to_string(),
            name: contact.name.clone(),
            phone: contact.phone.clone(),
            email: contact.email.clone(),
            company: contact.company.clone(),
            notes: contact.notes.clone(),
            groups: contact.groups.clone(),
        }
    }
}

impl From<ContactRecord> for Contact {
    fn from(record: ContactRecord) -> Self {
        Contact::new(
            ContactId::new(record.id),
            ContactFields {
                name: record.name,
                phone: record.phone,
                email: record.email,
                company: record.company,
                notes: record.notes,
            },
            record.groups,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Contact {
        Contact::new(
            ContactId::new("12345"),
            ContactFields {
                name: "Ann Chovey".to_string(),
                phone: "555-0101".to_string(),
                email: "ann@example.com".to_string(),
                company: "Acme Corp".to_string(),
                notes: "met at conference".to_string(),
            },
            vec!["Friends".to_string()],
        )
    }

    #[test]
    fn test_display_form() {
        let contact = sample();
        assert_eq!(contact.to_string(), "Ann Chovey (555-0101)");
    }

    #[test]
    fn test_add_and_remove_group() {
        let mut contact = sample();
        contact.add_group("Work");
        assert!(contact.in_group("Work"));
        assert!(contact.remove_group("Work"));
        assert!(!contact.in_group("Work"));
    }

    #[test]
    fn test_remove_group_missing_is_noop() {
        let mut contact = sample();
        assert!(!contact.remove_group("Enemies"));
        assert_eq!(contact.groups, vec!["Friends".to_string()]);
    }

    #[test]
    fn test_remove_group_drops_first_occurrence_only() {
        let mut contact = sample();
        // Duplicates can arrive through imported documents.
        contact.groups = vec!["A".into(), "B".into(), "A".into()];
        assert!(contact.remove_group("A"));
        assert_eq!(contact.groups, vec!["B".to_string(), "A".to_string()]);
    }

    #[test]
    fn test_record_roundtrip() {
        let contact = sample();
        let record = ContactRecord::from(&contact);
        let back = Contact::from(record);
        assert_eq!(back, contact);
    }

    #[test]
    fn test_record_deserializes_with_missing_fields() {
        let record: ContactRecord = serde_json::from_str(r#"{"id":"7","name":"Bob"}"#).unwrap();
        assert_eq!(record.id, "7");
        assert_eq!(record.name, "Bob");
        assert!(record.groups.is_empty());
        assert!(record.company.is_empty());
    }
}
