//! ContactId value object and identifier generation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Number of decimal digits in a generated contact id.
const ID_DIGITS: u32 = 5;

/// A contact identifier.
///
/// Identifiers are short numeric-looking strings. Generated ids are five
/// decimal digits; imported ids are accepted verbatim (persisted documents
/// from older versions carry the same shape). The id is immutable once a
/// contact is constructed.
///
/// # Example
///
/// ```
/// use rolodex::domain::ContactId;
///
/// let id = ContactId::new("41759");
/// assert_eq!(id.as_str(), "41759");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(String);

impl ContactId {
    /// Wrap an externally supplied identifier, e.g. one read from a
    /// persisted document. No validation: the original format never
    /// validated ids either, and round-tripping must not reject old files.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ContactId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Generator for fresh contact identifiers.
///
/// The original scheme sampled the last digit of the wall clock five times,
/// which collides for two contacts created within the same sub-second
/// window. This generator keeps the external shape (a five-digit numeric
/// string, no coordination with other processes) but seeds from the clock
/// once and then steps by a stride coprime to 10^5, so a single run never
/// repeats an id before 100,000 generations.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: Option<u64>,
}

/// Step between consecutive generated ids. Prime, and coprime to 10^5, so
/// the generator cycles through every five-digit value before repeating.
const ID_STRIDE: u64 = 7919;

impl IdGenerator {
    /// Create a new generator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a fresh five-digit identifier.
    pub fn next_id(&mut self) -> ContactId {
        let modulus = 10u64.pow(ID_DIGITS);
        let value = match self.last {
            Some(prev) => (prev + ID_STRIDE) % modulus,
            None => {
                let nanos = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.subsec_nanos() as u64)
                    .unwrap_or(0);
                nanos % modulus
            }
        };
        self.last = Some(value);
        ContactId(format!("{:0width$}", value, width = ID_DIGITS as usize))
    }
}
