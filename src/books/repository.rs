pub mod memory_book_repository;

use async_trait::async_trait;
use crate::books::domain::model::BookEntity;
use crate::core::library::{LibraryResult, PaginatedResult};
use crate::core::repository::Repository;

#[async_trait]
pub trait BookRepository: Repository<BookEntity> {
    // first book with the isbn in insertion order
    async fn find_by_isbn(&self, isbn: &str) -> LibraryResult<BookEntity>;

    async fn find_available(&self, page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<BookEntity>>;
}
