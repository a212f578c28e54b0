use thiserror::Error;

/// Errors that can occur when interacting with a person store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The identifier does not follow the store's identifier syntax.
    #[error("malformatted id: {0}")]
    MalformedId(String),

    /// Another record already carries this name.
    #[error("Person already exists")]
    DuplicateName(String),

    /// The store rejected the record's required-field constraints.
    #[error("{0}")]
    Validation(String),

    /// No free identifier could be found.
    #[error("Identifier space exhausted after {attempts} attempts")]
    IdSpaceExhausted { attempts: u32 },

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Result type for person store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
