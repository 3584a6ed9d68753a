pub mod model;
pub mod service;

use async_trait::async_trait;
use crate::books::dto::BookDto;
use crate::core::domain::Identifiable;
use crate::core::library::LibraryResult;
use crate::patrons::dto::PatronDto;

#[async_trait]
pub trait PatronService: Sync + Send {
    async fn add_patron(&self, patron: &PatronDto) -> LibraryResult<PatronDto>;
    async fn update_patron(&self, patron: &PatronDto) -> LibraryResult<PatronDto>;
    async fn find_patron_by_id(&self, id: &str) -> LibraryResult<PatronDto>;
    // records the book id on the patron only, the catalog is not consulted
    async fn borrow_book(&self, patron_id: &str, book_id: &str) -> LibraryResult<PatronDto>;
    // false when the patron did not hold the book id
    async fn return_book(&self, patron_id: &str, book_id: &str) -> LibraryResult<bool>;
    async fn list_borrowed(&self, patron_id: &str) -> LibraryResult<Vec<BookDto>>;
}

pub trait Patron: Identifiable {
    fn name(&self) -> &str;
    fn has_borrowed(&self, book_id: &str) -> bool;
    fn borrowed_count(&self) -> usize;
}
