//! Integration tests for simple and advanced search over a directory.

use rolodex::{advanced_search, simple_search, ContactFields, Directory, Field, Refinement};

fn seeded() -> Directory {
    let mut dir = Directory::new();
    let mut add = |name: &str, email: &str, company: &str, notes: &str| {
        dir.add_contact(ContactFields {
            name: name.to_string(),
            phone: "555-0100".to_string(),
            email: email.to_string(),
            company: company.to_string(),
            notes: notes.to_string(),
        })
        .id()
        .clone()
    };
    let ann = add("Ann Chovey", "ann@acme.example", "Acme Corp", "met at expo");
    let bob = add("Bob Frapples", "bob@home.example", "", "plays banjo");
    add("Cara Vann", "cara@globex.example", "Globex", "");
    dir.assign_group(&ann, "Friends");
    dir.assign_group(&bob, "Friends");
    dir
}

#[test]
fn phrase_matches_company_substring() {
    let dir = seeded();
    let results = simple_search(dir.contacts(), &["Acme".to_string()]);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "Ann Chovey");
}

#[test]
fn no_match_yields_empty_result() {
    let dir = seeded();
    assert!(simple_search(dir.contacts(), &["xylophone".to_string()]).is_empty());
}

#[test]
fn group_names_are_searchable() {
    let dir = seeded();
    let results = simple_search(dir.contacts(), &["friends".to_string()]);
    assert_eq!(results.len(), 2);
}

#[test]
fn multi_token_query_is_one_phrase() {
    let dir = seeded();
    // "bob frapples" as a phrase matches only Bob's name.
    let hit = simple_search(
        dir.contacts(),
        &["bob".to_string(), "frapples".to_string()],
    );
    assert_eq!(hit.len(), 1);
    // Tokens that never occur adjacently match nothing as a phrase.
    let miss = simple_search(
        dir.contacts(),
        &["bob".to_string(), "chovey".to_string()],
    );
    assert!(miss.is_empty());
}

#[test]
fn refinement_narrows_initial_candidates() {
    let dir = seeded();
    // "a" matches every contact somewhere; the company refinement keeps only
    // contacts whose company contains "Acme".
    let all = advanced_search(dir.contacts(), "a", &[]);
    assert_eq!(all.len(), 3);

    let narrowed = advanced_search(
        dir.contacts(),
        "a",
        &[Refinement {
            field: Field::Company,
            token: "Acme".to_string(),
        }],
    );
    assert_eq!(narrowed.len(), 1);
    assert_eq!(narrowed[0].name, "Ann Chovey");
}

#[test]
fn refinement_never_adds_candidates() {
    let dir = seeded();
    // Globex never matched the initial phrase, so the refinement cannot
    // resurrect it.
    let results = advanced_search(
        dir.contacts(),
        "banjo",
        &[Refinement {
            field: Field::Company,
            token: "Globex".to_string(),
        }],
    );
    assert!(results.is_empty());
}

#[test]
fn searching_does_not_mutate_the_directory() {
    let dir = seeded();
    let before = dir.bulk_export();
    let _ = advanced_search(
        dir.contacts(),
        "a",
        &[Refinement {
            field: Field::Groups,
            token: "friends".to_string(),
        }],
    );
    assert_eq!(dir.bulk_export(), before);
}
