//! Simple and advanced contact search.
//!
//! Both modes are plain functions over a borrowed contact slice; the engine
//! holds no state and never mutates the directory. Simple mode is a
//! union-style, case-insensitive substring match of one phrase across every
//! field. Advanced mode starts from the same all-field match and then
//! intersects the candidate set with per-field refinements, building a new
//! vector each step rather than removing elements mid-scan.

use crate::models::Contact;
use std::fmt;
use std::str::FromStr;

/// A selectable contact field for search refinement.
///
/// Closed enumeration: refinement dispatch is exhaustive at compile time
/// instead of switching on loose field-name strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Id,
    Name,
    Phone,
    Email,
    Company,
    Notes,
    Groups,
}

impl Field {
    /// All selectable fields, in display order.
    pub const ALL: [Field; 7] = [
        Field::Id,
        Field::Name,
        Field::Phone,
        Field::Email,
        Field::Company,
        Field::Notes,
        Field::Groups,
    ];

    /// Whether `token` matches this field of `contact`.
    ///
    /// Identifier comparison is exact equality; text fields are
    /// case-insensitive substring; groups match when any one group name
    /// contains the token.
    pub fn matches(self, contact: &Contact, token: &str) -> bool {
        let needle = token.to_lowercase();
        match self {
            Field::Id => contact.id().as_str() == token,
            Field::Name => contact.name.to_lowercase().contains(&needle),
            Field::Phone => contact.phone.to_lowercase().contains(&needle),
            Field::Email => contact.email.to_lowercase().contains(&needle),
            Field::Company => contact.company.to_lowercase().contains(&needle),
            Field::Notes => contact.notes.to_lowercase().contains(&needle),
            Field::Groups => contact
                .groups
                .iter()
                .any(|g| g.to_lowercase().contains(&needle)),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Id => "id",
            Field::Name => "name",
            Field::Phone => "phone",
            Field::Email => "email",
            Field::Company => "company",
            Field::Notes => "notes",
            Field::Groups => "groups",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "id" => Ok(Field::Id),
            "name" => Ok(Field::Name),
            "phone" => Ok(Field::Phone),
            "email" => Ok(Field::Email),
            "company" => Ok(Field::Company),
            "notes" | "note" => Ok(Field::Notes),
            "groups" | "group" => Ok(Field::Groups),
            other => Err(format!("unknown field '{}'", other)),
        }
    }
}

/// One field-scoped refinement step of an advanced search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refinement {
    pub field: Field,
    pub token: String,
}

/// Whether the lowercase phrase appears in any field of the contact.
fn matches_any_field(contact: &Contact, phrase: &str) -> bool {
    Field::ALL
        .iter()
        .any(|f| match f {
            // Simple mode treats the id as just another substring haystack.
            Field::Id => contact
                .id()
                .as_str()
                .to_lowercase()
                .contains(&phrase.to_lowercase()),
            _ => f.matches(contact, phrase),
        })
}

/// Simple-mode search: all tokens joined into one phrase, matched against
/// every field of every contact.
///
/// Returns matching contacts in collection order, each at most once no
/// matter how many fields matched. An empty result is an ordinary value,
/// never an error.
pub fn simple_search<'a>(contacts: &'a [Contact], tokens: &[String]) -> Vec<&'a Contact> {
    let phrase = tokens.join(" ");
    contacts
        .iter()
        .filter(|c| matches_any_field(c, &phrase))
        .collect()
}

/// Advanced-mode search: an all-field phrase match followed by per-field
/// intersection-style refinement.
///
/// The phrase produces the initial candidate set exactly as simple mode
/// does; each refinement then narrows it, dropping candidates whose named
/// field does not match the refinement token. Every step allocates a fresh
/// vector, so no collection is ever mutated while being scanned.
pub fn advanced_search<'a>(
    contacts: &'a [Contact],
    phrase: &str,
    refinements: &[Refinement],
) -> Vec<&'a Contact> {
    let mut candidates: Vec<&Contact> = contacts
        .iter()
        .filter(|c| matches_any_field(c, phrase))
        .collect();
    for refinement in refinements {
        candidates = candidates
            .into_iter()
            .filter(|c| refinement.field.matches(c, &refinement.token))
            .collect();
    }
    candidates
}
