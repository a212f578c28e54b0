//! Payload validation for contact records.

use person_store::NewPerson;
use serde::Deserialize;
use thiserror::Error;

/// A required field of a contact record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Number,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Name => write!(f, "name"),
            Field::Number => write!(f, "number"),
        }
    }
}

/// Validation failures for a submitted record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is absent or empty.
    #[error("{0} missing")]
    MissingField(Field),
}

/// A record as submitted by a client. Either field may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonInput {
    pub name: Option<String>,
    pub number: Option<String>,
}

impl PersonInput {
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            number: Some(number.into()),
        }
    }
}

/// Checks that name and number are present and non-empty.
///
/// The name is checked first; only the first failure is reported.
pub fn validate(input: PersonInput) -> Result<NewPerson, ValidationError> {
    let name = required(input.name, Field::Name)?;
    let number = required(input.number, Field::Number)?;
    Ok(NewPerson { name, number })
}

fn required(value: Option<String>, field: Field) -> Result<String, ValidationError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ValidationError::MissingField(field)),
    }
}
