//! Contact record storage for the phonebook backend.
//!
//! Provides the [`PersonStore`] trait together with an in-memory
//! implementation (numeric ids handed out by an [`IdAllocator`]) and a
//! PostgreSQL implementation (opaque UUID ids assigned on insert).

pub mod error;
pub mod id;
pub mod memory;
pub mod person;
pub mod postgres;
pub mod store;

pub use error::{Result, StoreError};
pub use id::{IdAllocator, IdStrategy};
pub use memory::InMemoryPersonStore;
pub use person::{DocumentId, NewPerson, NumericId, Person, PersonKey};
pub use postgres::PostgresPersonStore;
pub use store::{DuplicateNames, PersonStore, PersonStoreExt};
