pub mod service;

use std::fmt;
use std::fmt::{Display, Formatter};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::core::library::LibraryResult;

// Result of lending a book by isbn. None of the outcomes is an error.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum LendOutcome {
    Lent,
    AlreadyLent,
    NotFound,
}

impl Display for LendOutcome {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            LendOutcome::Lent => write!(f, "Book lent successfully!"),
            LendOutcome::AlreadyLent => write!(f, "Book is already lent."),
            LendOutcome::NotFound => write!(f, "Book not found."),
        }
    }
}

// Result of returning a book by isbn.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum ReturnOutcome {
    Returned,
    NotLent,
    NotFound,
}

impl Display for ReturnOutcome {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ReturnOutcome::Returned => write!(f, "Book returned successfully!"),
            ReturnOutcome::NotLent => write!(f, "Book is not lent."),
            ReturnOutcome::NotFound => write!(f, "Book not found."),
        }
    }
}

#[async_trait]
pub trait CatalogService: Sync + Send {
    async fn add_book(&self, book: &BookDto) -> LibraryResult<BookDto>;
    // false when no book had the id
    async fn remove_book(&self, id: &str) -> LibraryResult<bool>;
    async fn update_book(&self, book: &BookDto) -> LibraryResult<BookDto>;
    async fn find_book_by_id(&self, id: &str) -> LibraryResult<BookDto>;
    async fn find_book_by_isbn(&self, isbn: &str) -> LibraryResult<BookDto>;
    async fn lend_book(&self, isbn: &str) -> LibraryResult<LendOutcome>;
    async fn return_book(&self, isbn: &str) -> LibraryResult<ReturnOutcome>;
    async fn list_available(&self) -> LibraryResult<Vec<BookDto>>;
}
