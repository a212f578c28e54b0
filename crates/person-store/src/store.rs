use std::str::FromStr;

use async_trait::async_trait;

use crate::{NewPerson, Person, PersonKey, Result};

/// Policy for creating a record whose name is already taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateNames {
    /// Creation fails with [`StoreError::DuplicateName`](crate::StoreError::DuplicateName).
    #[default]
    Reject,
    /// Names are not checked.
    Allow,
}

impl FromStr for DuplicateNames {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "allow" => Ok(Self::Allow),
            other => Err(format!(
                "unknown duplicate-name policy '{other}', expected 'reject' or 'allow'"
            )),
        }
    }
}

/// Core trait for contact record storage.
///
/// All implementations must be thread-safe (Send + Sync). Single-record
/// operations are atomic; no operation spans several records.
#[async_trait]
pub trait PersonStore: Send + Sync {
    /// Identifier type handed out by this store.
    type Id: PersonKey;

    /// Returns every record.
    ///
    /// Records come back in insertion order.
    async fn list_all(&self) -> Result<Vec<Person<Self::Id>>>;

    /// Returns the number of stored records.
    async fn count(&self) -> Result<usize>;

    /// Looks up a single record.
    ///
    /// Returns None if no record has this id.
    async fn find_by_id(&self, id: &Self::Id) -> Result<Option<Person<Self::Id>>>;

    /// Assigns an identifier and inserts the record.
    ///
    /// With [`DuplicateNames::Reject`] the name check and the insert happen
    /// as one step, so two concurrent creates with the same name cannot
    /// both succeed.
    async fn create(&self, person: NewPerson, names: DuplicateNames)
    -> Result<Person<Self::Id>>;

    /// Replaces name and number of an existing record.
    ///
    /// Returns None if no record has this id. The id never changes.
    async fn update(&self, id: &Self::Id, person: NewPerson) -> Result<Option<Person<Self::Id>>>;

    /// Removes a record.
    ///
    /// Deleting an id that is not stored succeeds.
    async fn delete_by_id(&self, id: &Self::Id) -> Result<()>;
}

/// Extension trait providing convenience methods for person stores.
pub trait PersonStoreExt: PersonStore {
    /// Parses a raw identifier with this store's syntax.
    fn parse_id(raw: &str) -> Result<Self::Id> {
        <Self::Id as PersonKey>::parse(raw)
    }
}

// Blanket implementation for all PersonStore implementations
impl<T: PersonStore + ?Sized> PersonStoreExt for T {}
