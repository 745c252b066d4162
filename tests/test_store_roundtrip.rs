//! Integration tests for the JSON persistence adapter, including documents
//! written by the original tool.

use rolodex::{ContactFields, Directory, JsonStore, StoreError};
use std::fs;

#[test]
fn directory_survives_a_trip_through_disk() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("contacts.json");
    let store = JsonStore::new();

    let mut dir = Directory::new();
    let ann = dir
        .add_contact(ContactFields {
            name: "Ann Chovey".to_string(),
            phone: "555-0101".to_string(),
            email: "ann@acme.example".to_string(),
            company: "Acme Corp".to_string(),
            notes: "met at expo".to_string(),
        })
        .id()
        .clone();
    dir.assign_group(&ann, "Friends");

    store.save(&path, dir.bulk_export()).unwrap();

    let mut fresh = Directory::new();
    fresh.bulk_import(store.load(&path).unwrap());

    assert_eq!(fresh.len(), 1);
    let contact = fresh.lookup(&ann).unwrap();
    assert_eq!(contact.name, "Ann Chovey");
    assert_eq!(contact.company, "Acme Corp");
    assert_eq!(contact.groups, vec!["Friends".to_string()]);
    assert_eq!(fresh.company_members("Acme Corp").unwrap().len(), 1);
    assert_eq!(fresh.group_members("Friends").unwrap().len(), 1);
}

#[test]
fn legacy_document_loads_unchanged() {
    // Shape produced by the original tool: an object with a "contacts"
    // array, ids as short numeric strings, four-space indentation.
    let legacy = r#"{
    "contacts": [
        {
            "id": "66666",
            "name": "Donovan Griego",
            "phone": "555-0142",
            "email": "dg@example.com",
            "company": "State U",
            "notes": "author",
            "groups": [
                "School"
            ]
        }
    ]
}"#;
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("contacts.json");
    fs::write(&path, legacy).unwrap();

    let records = JsonStore::new().load(&path).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "66666");
    assert_eq!(records[0].groups, vec!["School".to_string()]);

    let mut dir = Directory::new();
    dir.bulk_import(records);
    assert_eq!(dir.group_size("School"), Some(1));
    assert_eq!(dir.company_size("State U"), Some(1));
}

#[test]
fn malformed_document_does_not_disturb_existing_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("contacts.json");
    fs::write(&path, "{\"contacts\": [").unwrap();

    let mut dir = Directory::new();
    dir.add_contact(ContactFields {
        name: "Keeper".to_string(),
        ..Default::default()
    });

    let err = JsonStore::new().load(&path).unwrap_err();
    assert!(matches!(err, StoreError::Malformed { .. }));
    // Nothing was imported, so the directory is exactly as before.
    assert_eq!(dir.len(), 1);
    assert_eq!(dir.contacts()[0].name, "Keeper");
}

#[test]
fn export_omits_index_data() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("contacts.json");

    let mut dir = Directory::new();
    let id = dir
        .add_contact(ContactFields {
            name: "Ann".to_string(),
            company: "Acme".to_string(),
            ..Default::default()
        })
        .id()
        .clone();
    dir.assign_group(&id, "Friends");
    JsonStore::new().save(&path, dir.bulk_export()).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let top = value.as_object().unwrap();
    assert_eq!(top.len(), 1);
    assert!(top.contains_key("contacts"));
}
