//! The in-memory contact store.
//!
//! A [`Directory`] owns the authoritative, insertion-ordered contact
//! collection plus two derived indexes: company name to members, and group
//! name to members. All mutation goes through the Directory so index
//! consistency is enforced in one place instead of scattered across callers.
//!
//! Index entries are contact ids resolved against the authoritative
//! collection, never owning pointers of their own, so a removed contact can
//! at worst leave a stale id behind. Removal deliberately does not scrub the
//! indexes; [`Directory::repair`] is the explicit reconciliation pass that
//! purges stale ids and deduplicates the primary collection.

use crate::domain::{ContactId, IdGenerator};
use crate::models::{Contact, ContactFields, ContactRecord};
use std::collections::BTreeMap;
use tracing::debug;

/// Outcome of a group assign/unassign operation.
///
/// Both operations are idempotent; the variants let the shell tell a fresh
/// change apart from a repeat without treating the repeat as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupChange {
    /// The contact was added to the group
    Added,
    /// The contact was already a member; nothing changed
    AlreadyMember,
    /// The contact was removed from the group
    Removed,
    /// The contact was not a member; nothing changed
    NotMember,
    /// The group key does not exist
    NoSuchGroup,
}

/// In-memory owner of all contacts and their derived indexes.
#[derive(Debug, Default)]
pub struct Directory {
    /// Authoritative collection, in insertion order
    contacts: Vec<Contact>,

    /// Company name -> member ids (companies with empty names are never keyed)
    companies: BTreeMap<String, Vec<ContactId>>,

    /// Group name -> member ids
    groups: BTreeMap<String, Vec<ContactId>>,

    id_gen: IdGenerator,
}

impl Directory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of contacts in the directory.
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    /// Whether the directory holds no contacts.
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// All contacts in insertion order.
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Look up a contact by id.
    pub fn lookup(&self, id: &ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id() == id)
    }

    /// Look up several ids at once.
    ///
    /// An id with no match yields `None` at its position; a missing contact
    /// is never an error here.
    pub fn lookup_many<'a>(
        &self,
        ids: impl IntoIterator<Item = &'a ContactId>,
    ) -> Vec<Option<&Contact>> {
        ids.into_iter().map(|id| self.lookup(id)).collect()
    }

    /// Add a new contact with a freshly generated identifier.
    ///
    /// The contact is appended to the primary collection and, when its
    /// company is non-empty, registered in the company index. Returns a
    /// reference to the inserted contact.
    pub fn add_contact(&mut self, fields: ContactFields) -> &Contact {
        let mut id = self.id_gen.next_id();
        // The generator cannot repeat within a run, but an imported document
        // may already occupy the id.
        while self.lookup(&id).is_some() {
            id = self.id_gen.next_id();
        }
        let contact = Contact::new(id.clone(), fields, Vec::new());
        if !contact.company.is_empty() {
            self.companies
                .entry(contact.company.clone())
                .or_default()
                .push(id.clone());
        }
        debug!(id = %id, name = %contact.name, "added contact");
        self.contacts.push(contact);
        &self.contacts[self.contacts.len() - 1]
    }

    /// Remove a contact from the primary collection.
    ///
    /// Returns the removed contact, or `None` if the id is unknown. The
    /// company and group indexes are NOT scrubbed here: any entries for the
    /// removed contact stay stale until [`Directory::repair`] runs. Callers
    /// that need immediate index truth call `repair()` after removing.
    pub fn remove_contact(&mut self, id: &ContactId) -> Option<Contact> {
        let idx = self.contacts.iter().position(|c| c.id() == id)?;
        let removed = self.contacts.remove(idx);
        debug!(id = %id, name = %removed.name, "removed contact");
        Some(removed)
    }

    /// Apply non-empty field changes to an existing contact.
    ///
    /// Empty strings in `changes` mean "keep the current value", matching
    /// the shell's edit flow where a blank answer keeps the old field. A
    /// company change moves the contact's entry from the old company key to
    /// the new one immediately, keeping the company index exact.
    pub fn update_contact(&mut self, id: &ContactId, changes: ContactFields) -> bool {
        let Some(idx) = self.contacts.iter().position(|c| c.id() == id) else {
            return false;
        };
        let old_company = self.contacts[idx].company.clone();
        {
            let contact = &mut self.contacts[idx];
            if !changes.name.is_empty() {
                contact.name = changes.name;
            }
            if !changes.phone.is_empty() {
                contact.phone = changes.phone;
            }
            if !changes.email.is_empty() {
                contact.email = changes.email;
            }
            if !changes.company.is_empty() {
                contact.company = changes.company;
            }
            if !changes.notes.is_empty() {
                contact.notes = changes.notes;
            }
        }
        let new_company = self.contacts[idx].company.clone();
        if new_company != old_company {
            if let Some(members) = self.companies.get_mut(&old_company) {
                members.retain(|m| m != id);
            }
            if !new_company.is_empty() {
                let members = self.companies.entry(new_company).or_default();
                if !members.contains(id) {
                    members.push(id.clone());
                }
            }
        }
        true
    }

    /// Assign a contact to a group.
    ///
    /// Creates the group key if it does not exist yet. On first assignment
    /// the contact is appended to both the index list and its own group
    /// list; a repeat reports [`GroupChange::AlreadyMember`] and changes
    /// nothing. An unknown contact id reports [`GroupChange::NotMember`].
    pub fn assign_group(&mut self, id: &ContactId, group: &str) -> GroupChange {
        let Some(idx) = self.contacts.iter().position(|c| c.id() == id) else {
            return GroupChange::NotMember;
        };
        let members = self.groups.entry(group.to_string()).or_default();
        if members.contains(id) {
            return GroupChange::AlreadyMember;
        }
        members.push(id.clone());
        self.contacts[idx].add_group(group);
        debug!(id = %id, group, "assigned group");
        GroupChange::Added
    }

    /// Remove a contact from a group.
    ///
    /// Reports [`GroupChange::NoSuchGroup`] if the group key does not exist
    /// and [`GroupChange::NotMember`] if the contact is not in it; both are
    /// no-ops, never panics.
    pub fn unassign_group(&mut self, id: &ContactId, group: &str) -> GroupChange {
        let Some(members) = self.groups.get_mut(group) else {
            return GroupChange::NoSuchGroup;
        };
        let Some(pos) = members.iter().position(|m| m == id) else {
            return GroupChange::NotMember;
        };
        members.remove(pos);
        if let Some(idx) = self.contacts.iter().position(|c| c.id() == id) {
            self.contacts[idx].remove_group(group);
        }
        debug!(id = %id, group, "unassigned group");
        GroupChange::Removed
    }

    /// Ensure a group key exists, with no members if it is new.
    pub fn create_group(&mut self, group: &str) -> bool {
        if self.groups.contains_key(group) {
            return false;
        }
        self.groups.insert(group.to_string(), Vec::new());
        true
    }

    /// Delete a group key entirely, removing the name from every member
    /// contact's own group list.
    pub fn delete_group(&mut self, group: &str) -> bool {
        if self.groups.remove(group).is_none() {
            return false;
        }
        for contact in &mut self.contacts {
            contact.remove_group(group);
        }
        true
    }

    /// Group names in sorted order.
    pub fn group_names(&self) -> Vec<&str> {
        self.groups.keys().map(String::as_str).collect()
    }

    /// Company names in sorted order.
    pub fn company_names(&self) -> Vec<&str> {
        self.companies.keys().map(String::as_str).collect()
    }

    /// Members of a group, resolved against the primary collection.
    ///
    /// Stale ids (left behind by removals that have not been repaired yet)
    /// are skipped during resolution, not surfaced as errors. Returns `None`
    /// if the group key does not exist.
    pub fn group_members(&self, group: &str) -> Option<Vec<&Contact>> {
        let members = self.groups.get(group)?;
        Some(members.iter().filter_map(|id| self.lookup(id)).collect())
    }

    /// Raw member-id count for a group key, stale ids included. `info`
    /// reports these counts the way the original did, pre-repair truth and
    /// all.
    pub fn group_size(&self, group: &str) -> Option<usize> {
        self.groups.get(group).map(Vec::len)
    }

    /// Members of a company, resolved against the primary collection.
    pub fn company_members(&self, company: &str) -> Option<Vec<&Contact>> {
        let members = self.companies.get(company)?;
        Some(members.iter().filter_map(|id| self.lookup(id)).collect())
    }

    /// Raw member-id count for a company key, stale ids included.
    pub fn company_size(&self, company: &str) -> Option<usize> {
        self.companies.get(company).map(Vec::len)
    }

    /// Reconcile the derived indexes with the primary collection.
    ///
    /// Three passes, in order:
    /// 1. deduplicate the primary collection by id, keeping the first
    ///    occurrence of each;
    /// 2. drop group-index ids that no longer resolve to a contact;
    /// 3. drop company-index ids that no longer resolve to a contact.
    ///
    /// Empty keys are left in place. Idempotent: a second call on an
    /// unchanged directory changes nothing.
    pub fn repair(&mut self) {
        let mut seen = std::collections::HashSet::new();
        let before = self.contacts.len();
        self.contacts.retain(|c| seen.insert(c.id().clone()));
        let dropped = before - self.contacts.len();

        let live: std::collections::HashSet<&ContactId> =
            self.contacts.iter().map(|c| c.id()).collect();
        let mut stale = 0usize;
        for members in self.groups.values_mut().chain(self.companies.values_mut()) {
            let before = members.len();
            members.retain(|id| live.contains(id));
            stale += before - members.len();
        }
        if dropped > 0 || stale > 0 {
            debug!(duplicates = dropped, stale_refs = stale, "repaired directory");
        }
    }

    /// Replace the directory's entire contents from flat records.
    ///
    /// Identifiers are preserved verbatim and both indexes are rebuilt from
    /// scratch by replaying each record's company and group membership. This
    /// is the inverse of [`Directory::bulk_export`].
    pub fn bulk_import(&mut self, records: Vec<ContactRecord>) {
        self.contacts.clear();
        self.companies.clear();
        self.groups.clear();
        for record in records {
            let contact = Contact::from(record);
            let id = contact.id().clone();
            if !contact.company.is_empty() {
                self.companies
                    .entry(contact.company.clone())
                    .or_default()
                    .push(id.clone());
            }
            for group in &contact.groups {
                self.groups.entry(group.clone()).or_default().push(id.clone());
            }
            self.contacts.push(contact);
        }
        debug!(count = self.contacts.len(), "imported contacts");
    }

    /// Flatten all contacts, in collection order, to the record shape.
    ///
    /// Derived-index data is omitted; the indexes are always reconstructable
    /// from the contacts themselves.
    pub fn bulk_export(&self) -> Vec<ContactRecord> {
        self.contacts.iter().map(ContactRecord::from).collect()
    }
}
