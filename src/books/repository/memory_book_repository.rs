use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::core::library::{BookStatus, LibraryError, LibraryResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::utils::memory::MemoryTable;

#[derive(Debug)]
pub struct MemoryBookRepository {
    table: MemoryTable<BookEntity>,
}

impl MemoryBookRepository {
    pub(crate) fn new(table: MemoryTable<BookEntity>) -> Self {
        Self {
            table,
        }
    }
}

#[async_trait]
impl Repository<BookEntity> for MemoryBookRepository {
    async fn create(&self, entity: &BookEntity) -> LibraryResult<usize> {
        debug!(table = self.table.name(), book_id = entity.book_id.as_str(), isbn = entity.isbn.as_str(), "create book");
        self.table.insert(entity.clone()).await
    }

    async fn update(&self, entity: &BookEntity) -> LibraryResult<usize> {
        let mut next = entity.clone();
        next.version = entity.version + 1;
        next.updated_at = Utc::now().naive_utc();
        self.table.replace(entity.version, next).await
    }

    async fn get(&self, id: &str) -> LibraryResult<BookEntity> {
        self.table.get(id).await
    }

    async fn delete(&self, id: &str) -> LibraryResult<usize> {
        let removed = self.table.remove(id).await;
        debug!(table = self.table.name(), book_id = id, removed, "delete book");
        Ok(removed)
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<BookEntity>> {
        self.table.query(predicate, page, page_size).await
    }
}

#[async_trait]
impl BookRepository for MemoryBookRepository {
    async fn find_by_isbn(&self, isbn: &str) -> LibraryResult<BookEntity> {
        self.table.find_first(|b| b.isbn == isbn && !b.is_removed()).await.ok_or_else(||
            LibraryError::not_found(format!("book not found for isbn {}", isbn).as_str()))
    }

    async fn find_available(&self, page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<BookEntity>> {
        let predicate = HashMap::from([
            ("lent".to_string(), false.to_string()),
            ("status".to_string(), BookStatus::Listed.to_string())]);
        self.query(&predicate, page, page_size).await
    }
}
