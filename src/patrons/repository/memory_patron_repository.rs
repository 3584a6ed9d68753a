use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;

use crate::core::library::{LibraryResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::patrons::domain::model::PatronEntity;
use crate::patrons::repository::PatronRepository;
use crate::utils::memory::MemoryTable;

#[derive(Debug)]
pub struct MemoryPatronRepository {
    table: MemoryTable<PatronEntity>,
}

impl MemoryPatronRepository {
    pub(crate) fn new(table: MemoryTable<PatronEntity>) -> Self {
        Self {
            table,
        }
    }
}

#[async_trait]
impl Repository<PatronEntity> for MemoryPatronRepository {
    async fn create(&self, entity: &PatronEntity) -> LibraryResult<usize> {
        self.table.insert(entity.clone()).await
    }

    async fn update(&self, entity: &PatronEntity) -> LibraryResult<usize> {
        let mut next = entity.clone();
        next.version = entity.version + 1;
        next.updated_at = Utc::now().naive_utc();
        self.table.replace(entity.version, next).await
    }

    async fn get(&self, id: &str) -> LibraryResult<PatronEntity> {
        self.table.get(id).await
    }

    async fn delete(&self, id: &str) -> LibraryResult<usize> {
        Ok(self.table.remove(id).await)
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<PatronEntity>> {
        self.table.query(predicate, page, page_size).await
    }
}

impl PatronRepository for MemoryPatronRepository {}
