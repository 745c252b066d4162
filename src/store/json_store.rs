//! JSON file persistence for the contact directory.
//!
//! The document shape is `{"contacts": [record, ...]}` where each record is
//! the flat shape produced by `Directory::bulk_export`. The store only moves
//! records between disk and memory; it never touches a Directory directly,
//! so a malformed file fails before any in-memory state is disturbed.
//!
//! Saves go through a temporary file in the destination directory followed
//! by a rename, so an interrupted write leaves the previous document intact.

use crate::error::{StoreError, StoreResult};
use crate::models::ContactRecord;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// The persisted document: a single object with a `contacts` array.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactsDocument {
    pub contacts: Vec<ContactRecord>,
}

/// Loads and saves contacts documents.
#[derive(Debug, Default)]
pub struct JsonStore;

impl JsonStore {
    pub fn new() -> Self {
        Self
    }

    /// Read and parse a contacts file.
    ///
    /// A missing file is [`StoreError::NotFound`]; unreadable or unparsable
    /// content is [`StoreError::Malformed`] / [`StoreError::Io`]. On any
    /// error no records are returned, so the caller's directory stays
    /// untouched.
    pub fn load(&self, path: impl AsRef<Path>) -> StoreResult<Vec<ContactRecord>> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(StoreError::NotFound(path.display().to_string()));
        }
        let text = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let document: ContactsDocument =
            serde_json::from_str(&text).map_err(|e| StoreError::Malformed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        info!(path = %path.display(), count = document.contacts.len(), "loaded contacts file");
        Ok(document.contacts)
    }

    /// Write records to a contacts file, pretty-printed.
    ///
    /// The document is written to a temp file beside the destination and
    /// renamed into place, so a crash mid-write cannot corrupt an existing
    /// file.
    pub fn save(&self, path: impl AsRef<Path>, records: Vec<ContactRecord>) -> StoreResult<()> {
        let path = path.as_ref();
        let document = ContactsDocument { contacts: records };
        let json =
            serde_json::to_string_pretty(&document).map_err(|e| StoreError::Malformed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
        let mut tmp = match dir {
            Some(dir) => tempfile::NamedTempFile::new_in(dir),
            None => tempfile::NamedTempFile::new_in("."),
        }
        .map_err(|source| StoreError::Io {
            path: path.display().to_string(),
            source,
        })?;
        tmp.write_all(json.as_bytes())
            .map_err(|source| StoreError::Io {
                path: path.display().to_string(),
                source,
            })?;
        tmp.persist(path).map_err(|e| StoreError::Io {
            path: path.display().to_string(),
            source: e.error,
        })?;
        info!(path = %path.display(), count = document.contacts.len(), "saved contacts file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str) -> ContactRecord {
        ContactRecord {
            id: id.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.json");
        let store = JsonStore::new();

        store
            .save(&path, vec![record("1", "Ann"), record("2", "Bob")])
            .unwrap();
        let records = store.load(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Ann");
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = JsonStore::new()
            .load(dir.path().join("nope.json"))
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn test_load_malformed_file_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.json");
        fs::write(&path, "{ not json").unwrap();
        let err = JsonStore::new().load(&path).unwrap_err();
        assert!(matches!(err, StoreError::Malformed { .. }));
    }

    #[test]
    fn test_interrupted_shape_wrong_type_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.json");
        fs::write(&path, r#"{"contacts": "oops"}"#).unwrap();
        assert!(matches!(
            JsonStore::new().load(&path),
            Err(StoreError::Malformed { .. })
        ));
    }

    #[test]
    fn test_save_overwrites_atomically_and_leaves_no_droppings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.json");
        let store = JsonStore::new();
        store.save(&path, vec![record("1", "Ann")]).unwrap();
        store.save(&path, vec![record("2", "Bob")]).unwrap();

        let records = store.load(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Bob");

        // Only the destination file remains in the directory.
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_document_field_names_match_legacy_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.json");
        let mut rec = record("41759", "Ann Chovey");
        rec.groups = vec!["Friends".to_string()];
        JsonStore::new().save(&path, vec![rec]).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        for key in ["contacts", "id", "name", "phone", "email", "company", "notes", "groups"] {
            assert!(text.contains(&format!("\"{}\"", key)), "missing key {}", key);
        }
    }
}
