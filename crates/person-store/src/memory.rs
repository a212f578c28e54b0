use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    DuplicateNames, IdAllocator, IdStrategy, NewPerson, NumericId, Person, Result, StoreError,
    store::PersonStore,
};

#[derive(Debug, Default)]
struct Records {
    people: Vec<Person<NumericId>>,
    ids: HashSet<NumericId>,
    allocator: IdAllocator,
}

/// In-memory person store.
///
/// Records live in process memory behind a single lock, in insertion
/// order. Cloning shares the underlying records.
#[derive(Clone, Default)]
pub struct InMemoryPersonStore {
    records: Arc<RwLock<Records>>,
}

impl InMemoryPersonStore {
    /// Creates a new empty in-memory store using the default id strategy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new empty in-memory store with the given id allocator.
    pub fn with_allocator(allocator: IdAllocator) -> Self {
        Self {
            records: Arc::new(RwLock::new(Records {
                allocator,
                ..Records::default()
            })),
        }
    }

    /// Creates a store using `strategy` for new ids.
    pub fn with_strategy(strategy: IdStrategy) -> Self {
        Self::with_allocator(IdAllocator::new(strategy))
    }

    /// Creates a store pre-populated with the sample phonebook (ids 1 to 4).
    pub fn with_sample_data(strategy: IdStrategy) -> Self {
        let mut records = Records {
            allocator: IdAllocator::new(strategy),
            ..Records::default()
        };
        for (id, (name, number)) in (1..).zip(SAMPLE_PEOPLE) {
            let id = NumericId::new(id);
            records.ids.insert(id);
            records.people.push(NewPerson::new(name, number).with_id(id));
        }

        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }
}

const SAMPLE_PEOPLE: [(&str, &str); 4] = [
    ("Arto Hellas", "040-123456"),
    ("Ada Lovelace", "39-44-5323523"),
    ("Dan Abramov", "12-43-234345"),
    ("Mary Poppendieck", "39-23-6423122"),
];

#[async_trait]
impl PersonStore for InMemoryPersonStore {
    type Id = NumericId;

    async fn list_all(&self) -> Result<Vec<Person<NumericId>>> {
        Ok(self.records.read().await.people.clone())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.records.read().await.people.len())
    }

    async fn find_by_id(&self, id: &NumericId) -> Result<Option<Person<NumericId>>> {
        let records = self.records.read().await;
        Ok(records.people.iter().find(|p| p.id == *id).cloned())
    }

    async fn create(
        &self,
        person: NewPerson,
        names: DuplicateNames,
    ) -> Result<Person<NumericId>> {
        let mut records = self.records.write().await;

        if names == DuplicateNames::Reject && records.people.iter().any(|p| p.name == person.name)
        {
            return Err(StoreError::DuplicateName(person.name));
        }

        let Records {
            people,
            ids,
            allocator,
        } = &mut *records;
        let id = allocator.allocate(ids)?;

        let created = person.with_id(id);
        ids.insert(id);
        people.push(created.clone());

        Ok(created)
    }

    async fn update(
        &self,
        id: &NumericId,
        person: NewPerson,
    ) -> Result<Option<Person<NumericId>>> {
        let mut records = self.records.write().await;
        let Some(existing) = records.people.iter_mut().find(|p| p.id == *id) else {
            return Ok(None);
        };

        existing.name = person.name;
        existing.number = person.number;
        Ok(Some(existing.clone()))
    }

    async fn delete_by_id(&self, id: &NumericId) -> Result<()> {
        let mut records = self.records.write().await;
        if records.ids.remove(id) {
            records.people.retain(|p| p.id != *id);
        }
        Ok(())
    }
}
