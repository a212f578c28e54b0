use std::fmt::{Debug, Display};
use std::hash::Hash;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Result, StoreError};

/// Identifier type of a particular store.
///
/// Each store has its own identifier syntax. Parsing a raw path segment
/// either yields a well-formed key or [`StoreError::MalformedId`], which
/// is reported differently from a well-formed key without a record.
pub trait PersonKey:
    Debug + Display + Clone + PartialEq + Eq + Hash + Serialize + Send + Sync + 'static
{
    /// Parses a raw identifier.
    fn parse(raw: &str) -> Result<Self>;
}

/// Numeric identifier used by the in-memory store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NumericId(u64);

impl NumericId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for NumericId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PersonKey for NumericId {
    fn parse(raw: &str) -> Result<Self> {
        raw.parse::<u64>()
            .map(Self)
            .map_err(|_| StoreError::MalformedId(raw.to_string()))
    }
}

/// Opaque identifier assigned by the PostgreSQL store on insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Creates a new random document ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a document ID from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PersonKey for DocumentId {
    fn parse(raw: &str) -> Result<Self> {
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| StoreError::MalformedId(raw.to_string()))
    }
}

/// A contact record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person<Id> {
    pub id: Id,
    pub name: String,
    pub number: String,
}

/// The name and number of a record that has not been stored yet.
///
/// Also used as the full replacement payload on update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPerson {
    pub name: String,
    pub number: String,
}

impl NewPerson {
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            number: number.into(),
        }
    }

    /// Attaches an identifier, producing a stored record.
    pub fn with_id<Id>(self, id: Id) -> Person<Id> {
        Person {
            id,
            name: self.name,
            number: self.number,
        }
    }
}
