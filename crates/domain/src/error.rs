//! Domain error types.

use person_store::StoreError;
use thiserror::Error;

use crate::validation::ValidationError;

/// Errors that can occur during phonebook operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The submitted payload failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An error occurred in the person store.
    #[error(transparent)]
    Store(#[from] StoreError),
}
