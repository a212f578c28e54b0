//! Domain layer for the phonebook backend.
//!
//! This crate provides:
//! - payload validation for new and replaced contact records
//! - the [`Phonebook`] service that applies the duplicate-name policy and
//!   drives a [`PersonStore`]
//! - domain error types

pub mod error;
pub mod phonebook;
pub mod validation;

pub use error::DomainError;
pub use person_store::{DuplicateNames, NewPerson, Person, PersonStore, StoreError};
pub use phonebook::Phonebook;
pub use validation::{Field, PersonInput, ValidationError, validate};
