use async_trait::async_trait;
use std::collections::HashMap;
use crate::books::domain::model::BookEntity;
use crate::core::events::DomainEvent;
use crate::core::library::{LibraryResult, PaginatedResult};
use crate::patrons::domain::model::PatronEntity;
use crate::utils::memory::MemoryTable;

#[async_trait]
pub trait Repository<Entity>: Sync + Send {
    // create an entity
    async fn create(&self, entity: &Entity) -> LibraryResult<usize>;

    // updates an entity, failing when the stored version moved on
    async fn update(&self, entity: &Entity) -> LibraryResult<usize>;

    // get an entity
    async fn get(&self, id: &str) -> LibraryResult<Entity>;

    // delete an entity, zero when it did not exist
    async fn delete(&self, id: &str) -> LibraryResult<usize>;

    // find by attributes in insertion order
    async fn query(&self, predicate: &HashMap::<String, String>,
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<Entity>>;
}

// RepositoryStore holds the process-local tables. Cloning shares the tables, so every
// repository and publisher built from one store sees the same data.
#[derive(Debug, Clone)]
pub struct RepositoryStore {
    pub(crate) books: MemoryTable<BookEntity>,
    pub(crate) patrons: MemoryTable<PatronEntity>,
    pub(crate) events: MemoryTable<DomainEvent>,
}

impl RepositoryStore {
    pub fn new() -> Self {
        RepositoryStore {
            books: MemoryTable::new("books"),
            patrons: MemoryTable::new("patrons"),
            events: MemoryTable::new("events"),
        }
    }
}

impl Default for RepositoryStore {
    fn default() -> Self {
        Self::new()
    }
}
