use async_trait::async_trait;
use tracing::{debug, info};
use crate::books::domain::Book;
use crate::books::domain::model::BookEntity;
use crate::books::dto::BookDto;
use crate::books::repository::BookRepository;
use crate::catalog::domain::{CatalogService, LendOutcome, ReturnOutcome};
use crate::core::domain::Configuration;
use crate::core::events::{DomainEvent, DomainEventType};
use crate::core::library::{LibraryError, LibraryResult};
use crate::gateway::events::EventPublisher;

pub(crate) struct CatalogServiceImpl {
    branch_id: String,
    page_size: usize,
    book_repository: Box<dyn BookRepository>,
    events_publisher: Box<dyn EventPublisher>,
}

impl CatalogServiceImpl {
    pub(crate) fn new(config: &Configuration, book_repository: Box<dyn BookRepository>,
                      events_publisher: Box<dyn EventPublisher>) -> Self {
        Self {
            branch_id: config.branch_id.to_string(),
            page_size: config.page_size,
            book_repository,
            events_publisher,
        }
    }

    async fn find_by_isbn(&self, isbn: &str) -> LibraryResult<Option<BookEntity>> {
        match self.book_repository.find_by_isbn(isbn).await {
            Ok(book) => Ok(Some(book)),
            Err(LibraryError::NotFound { .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn save_lent(&self, mut book: BookEntity, lent: bool, kind: DomainEventType) -> LibraryResult<()> {
        if lent {
            book.mark_lent();
        } else {
            book.mark_available();
        }
        self.book_repository.update(&book).await?;
        self.events_publisher.publish(&DomainEvent::new(
            kind, book.book_id.as_str(), self.branch_id.as_str(), &book.isbn)?).await
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn add_book(&self, book: &BookDto) -> LibraryResult<BookDto> {
        self.book_repository.create(&BookEntity::from(book)).await?;
        self.events_publisher.publish(&DomainEvent::new(
            DomainEventType::BookAdded, book.book_id.as_str(), self.branch_id.as_str(), book)?).await?;
        info!(book_id = book.book_id.as_str(), isbn = book.isbn.as_str(), book_type = book.book_type(), "book added");
        Ok(book.clone())
    }

    // Soft delete: the row stays resolvable by id for patrons that still hold it.
    async fn remove_book(&self, id: &str) -> LibraryResult<bool> {
        let mut book = match self.book_repository.get(id).await {
            Ok(book) if !book.is_removed() => book,
            Ok(_) | Err(LibraryError::NotFound { .. }) => return Ok(false),
            Err(err) => return Err(err),
        };
        book.mark_removed();
        self.book_repository.update(&book).await?;
        let data = id.to_string();
        self.events_publisher.publish(&DomainEvent::new(
            DomainEventType::BookRemoved, id, self.branch_id.as_str(), &data)?).await?;
        info!(book_id = id, isbn = book.isbn.as_str(), "book removed");
        Ok(true)
    }

    async fn update_book(&self, book: &BookDto) -> LibraryResult<BookDto> {
        self.book_repository.update(&BookEntity::from(book)).await?;
        let updated = self.find_book_by_id(book.book_id.as_str()).await?;
        self.events_publisher.publish(&DomainEvent::new(
            DomainEventType::BookUpdated, book.book_id.as_str(), self.branch_id.as_str(), &updated)?).await?;
        Ok(updated)
    }

    async fn find_book_by_id(&self, id: &str) -> LibraryResult<BookDto> {
        match self.book_repository.get(id).await? {
            book if book.is_removed() => Err(LibraryError::not_found(format!("book {} was removed", id).as_str())),
            book => Ok(BookDto::from(&book)),
        }
    }

    async fn find_book_by_isbn(&self, isbn: &str) -> LibraryResult<BookDto> {
        self.book_repository.find_by_isbn(isbn).await.map(|b| BookDto::from(&b))
    }

    async fn lend_book(&self, isbn: &str) -> LibraryResult<LendOutcome> {
        let outcome = match self.find_by_isbn(isbn).await? {
            None => LendOutcome::NotFound,
            Some(book) if book.is_lent() => LendOutcome::AlreadyLent,
            Some(book) => {
                self.save_lent(book, true, DomainEventType::BookLent).await?;
                LendOutcome::Lent
            }
        };
        debug!(isbn, outcome = ?outcome, "lend book");
        Ok(outcome)
    }

    async fn return_book(&self, isbn: &str) -> LibraryResult<ReturnOutcome> {
        let outcome = match self.find_by_isbn(isbn).await? {
            None => ReturnOutcome::NotFound,
            Some(book) if !book.is_lent() => ReturnOutcome::NotLent,
            Some(book) => {
                self.save_lent(book, false, DomainEventType::BookReturned).await?;
                ReturnOutcome::Returned
            }
        };
        debug!(isbn, outcome = ?outcome, "return book");
        Ok(outcome)
    }

    async fn list_available(&self) -> LibraryResult<Vec<BookDto>> {
        let mut books = vec![];
        let mut page: Option<String> = None;
        loop {
            let res = self.book_repository.find_available(page.as_deref(), self.page_size).await?;
            books.extend(res.records.iter().map(BookDto::from));
            match res.next_page {
                Some(next) => page = Some(next),
                None => break,
            }
        }
        Ok(books)
    }
}
