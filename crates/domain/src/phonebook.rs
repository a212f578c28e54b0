//! Phonebook service providing the contact operations exposed over HTTP.

use person_store::{DuplicateNames, Person, PersonStore};

use crate::error::DomainError;
use crate::validation::{PersonInput, validate};

/// Service for managing contact records.
///
/// Validates payloads before the store is touched and applies the
/// configured duplicate-name policy on creation.
pub struct Phonebook<S: PersonStore> {
    store: S,
    duplicate_names: DuplicateNames,
}

impl<S: PersonStore> Phonebook<S> {
    /// Creates a new phonebook over the given store.
    pub fn new(store: S, duplicate_names: DuplicateNames) -> Self {
        Self {
            store,
            duplicate_names,
        }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns every record.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Person<S::Id>>, DomainError> {
        Ok(self.store.list_all().await?)
    }

    /// Returns the number of records.
    #[tracing::instrument(skip(self))]
    pub async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.store.count().await?)
    }

    /// Loads a record by ID.
    ///
    /// Returns None if the record doesn't exist.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: &S::Id) -> Result<Option<Person<S::Id>>, DomainError> {
        Ok(self.store.find_by_id(id).await?)
    }

    /// Validates and stores a new record.
    #[tracing::instrument(skip(self))]
    pub async fn add(&self, input: PersonInput) -> Result<Person<S::Id>, DomainError> {
        let person = validate(input).inspect_err(|_| {
            metrics::counter!("phonebook_validation_failures_total").increment(1);
        })?;

        let created = self.store.create(person, self.duplicate_names).await?;

        tracing::info!(id = %created.id, "person created");
        metrics::counter!("phonebook_persons_created_total").increment(1);
        Ok(created)
    }

    /// Replaces name and number of an existing record.
    ///
    /// Returns None if the record doesn't exist.
    #[tracing::instrument(skip(self))]
    pub async fn update(
        &self,
        id: &S::Id,
        input: PersonInput,
    ) -> Result<Option<Person<S::Id>>, DomainError> {
        let person = validate(input).inspect_err(|_| {
            metrics::counter!("phonebook_validation_failures_total").increment(1);
        })?;

        let updated = self.store.update(id, person).await?;
        if updated.is_some() {
            metrics::counter!("phonebook_persons_updated_total").increment(1);
        }
        Ok(updated)
    }

    /// Removes a record. Removing an unknown id succeeds.
    #[tracing::instrument(skip(self))]
    pub async fn remove(&self, id: &S::Id) -> Result<(), DomainError> {
        self.store.delete_by_id(id).await?;
        metrics::counter!("phonebook_persons_deleted_total").increment(1);
        Ok(())
    }
}
