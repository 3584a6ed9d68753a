use async_trait::async_trait;
use tracing::warn;
use crate::books::dto::BookDto;
use crate::books::repository::BookRepository;
use crate::core::domain::Configuration;
use crate::core::events::{DomainEvent, DomainEventType};
use crate::core::library::{LibraryError, LibraryResult};
use crate::gateway::events::EventPublisher;
use crate::patrons::domain::model::PatronEntity;
use crate::patrons::domain::PatronService;
use crate::patrons::dto::PatronDto;
use crate::patrons::repository::PatronRepository;

pub(crate) struct PatronServiceImpl {
    branch_id: String,
    patron_repository: Box<dyn PatronRepository>,
    book_repository: Box<dyn BookRepository>,
    events_publisher: Box<dyn EventPublisher>,
}

impl PatronServiceImpl {
    pub(crate) fn new(config: &Configuration, patron_repository: Box<dyn PatronRepository>,
                      book_repository: Box<dyn BookRepository>,
                      events_publisher: Box<dyn EventPublisher>) -> Self {
        PatronServiceImpl {
            branch_id: config.branch_id.to_string(),
            patron_repository,
            book_repository,
            events_publisher,
        }
    }

    async fn save(&self, patron: &PatronEntity) -> LibraryResult<PatronDto> {
        self.patron_repository.update(patron).await?;
        self.patron_repository.get(patron.patron_id.as_str()).await.map(|p| PatronDto::from(&p))
    }
}

#[async_trait]
impl PatronService for PatronServiceImpl {
    async fn add_patron(&self, patron: &PatronDto) -> LibraryResult<PatronDto> {
        self.patron_repository.create(&PatronEntity::from(patron)).await?;
        self.events_publisher.publish(&DomainEvent::new(
            DomainEventType::PatronRegistered, patron.patron_id.as_str(), self.branch_id.as_str(), patron)?).await?;
        Ok(patron.clone())
    }

    async fn update_patron(&self, patron: &PatronDto) -> LibraryResult<PatronDto> {
        let updated = self.save(&PatronEntity::from(patron)).await?;
        self.events_publisher.publish(&DomainEvent::new(
            DomainEventType::PatronUpdated, patron.patron_id.as_str(), self.branch_id.as_str(), &updated)?).await?;
        Ok(updated)
    }

    async fn find_patron_by_id(&self, id: &str) -> LibraryResult<PatronDto> {
        self.patron_repository.get(id).await.map(|p| PatronDto::from(&p))
    }

    async fn borrow_book(&self, patron_id: &str, book_id: &str) -> LibraryResult<PatronDto> {
        let mut patron = self.patron_repository.get(patron_id).await?;
        patron.borrow(book_id);
        self.save(&patron).await
    }

    async fn return_book(&self, patron_id: &str, book_id: &str) -> LibraryResult<bool> {
        let mut patron = self.patron_repository.get(patron_id).await?;
        if !patron.return_book(book_id) {
            return Ok(false);
        }
        self.save(&patron).await.map(|_| true)
    }

    async fn list_borrowed(&self, patron_id: &str) -> LibraryResult<Vec<BookDto>> {
        let patron = self.patron_repository.get(patron_id).await?;
        let mut books = vec![];
        for book_id in &patron.borrowed_book_ids {
            match self.book_repository.get(book_id.as_str()).await {
                Ok(book) => books.push(BookDto::from(&book)),
                Err(LibraryError::NotFound { .. }) => {
                    warn!(patron_id, book_id = book_id.as_str(), "borrowed book no longer in catalog");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(books)
    }
}
