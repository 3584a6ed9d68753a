use async_trait::async_trait;
use tracing::{info, warn};
use crate::books::domain::Book;
use crate::catalog::domain::{CatalogService, LendOutcome, ReturnOutcome};
use crate::checkout::domain::CheckoutService;
use crate::checkout::dto::CheckoutDto;
use crate::core::domain::Configuration;
use crate::core::events::{DomainEvent, DomainEventType};
use crate::core::library::{CheckoutStatus, LibraryError, LibraryResult};
use crate::gateway::events::EventPublisher;
use crate::patrons::domain::{Patron, PatronService};

pub(crate) struct CheckoutServiceImpl {
    branch_id: String,
    patron_service: Box<dyn PatronService>,
    catalog_service: Box<dyn CatalogService>,
    events_publisher: Box<dyn EventPublisher>,
}

impl CheckoutServiceImpl {
    pub(crate) fn new(config: &Configuration, patron_service: Box<dyn PatronService>,
                      catalog_service: Box<dyn CatalogService>,
                      events_publisher: Box<dyn EventPublisher>) -> Self {
        Self {
            branch_id: config.branch_id.to_string(),
            patron_service,
            catalog_service,
            events_publisher,
        }
    }

    async fn publish(&self, kind: DomainEventType, checkout: &CheckoutDto) -> LibraryResult<()> {
        self.events_publisher.publish(&DomainEvent::new(
            kind, checkout.checkout_id.as_str(), self.branch_id.as_str(), checkout)?).await
    }
}

#[async_trait]
impl CheckoutService for CheckoutServiceImpl {
    async fn checkout(&self, patron_id: &str, isbn: &str) -> LibraryResult<CheckoutDto> {
        let patron = self.patron_service.find_patron_by_id(patron_id).await?;
        let book = self.catalog_service.find_book_by_isbn(isbn).await?;
        if book.is_lent() {
            return Err(LibraryError::unavailable(format!("book is already lent {}",
                                                         book.book_id).as_str(), Some("409".to_string()), false));
        }
        match self.catalog_service.lend_book(isbn).await? {
            LendOutcome::Lent => {}
            other => {
                return Err(LibraryError::unavailable(format!("book {} could not be lent: {}",
                                                             isbn, other).as_str(), None, false));
            }
        }
        if let Err(err) = self.patron_service.borrow_book(patron_id, book.book_id.as_str()).await {
            warn!(patron_id, isbn, error = %err, "borrow failed, undoing catalog lend");
            self.catalog_service.return_book(isbn).await?;
            return Err(err);
        }
        let checkout = CheckoutDto::from_patron_book(self.branch_id.as_str(), &patron, &book, CheckoutStatus::CheckedOut);
        self.publish(DomainEventType::BookCheckedOut, &checkout).await?;
        info!(patron_id, isbn, book_id = book.book_id.as_str(), "book checked out");
        Ok(checkout)
    }

    async fn returned(&self, patron_id: &str, isbn: &str) -> LibraryResult<CheckoutDto> {
        let patron = self.patron_service.find_patron_by_id(patron_id).await?;
        let book = self.catalog_service.find_book_by_isbn(isbn).await?;
        if !book.is_lent() || !patron.has_borrowed(book.book_id.as_str()) {
            return Err(LibraryError::validation(format!("book {} is not borrowed by patron {}",
                                                        isbn, patron_id).as_str(), Some("400".to_string())));
        }
        match self.catalog_service.return_book(isbn).await? {
            ReturnOutcome::Returned => {}
            other => {
                return Err(LibraryError::validation(format!("book {} could not be returned: {}",
                                                            isbn, other).as_str(), None));
            }
        }
        let released = self.patron_service.return_book(patron_id, book.book_id.as_str()).await;
        if !matches!(released, Ok(true)) {
            warn!(patron_id, isbn, "return failed on patron, undoing catalog return");
            self.catalog_service.lend_book(isbn).await?;
            return Err(released.err().unwrap_or_else(|| LibraryError::validation(
                format!("book {} is not borrowed by patron {}", isbn, patron_id).as_str(), None)));
        }
        let checkout = CheckoutDto::from_patron_book(self.branch_id.as_str(), &patron, &book, CheckoutStatus::Returned);
        self.publish(DomainEventType::BookCheckedIn, &checkout).await?;
        info!(patron_id, isbn, book_id = book.book_id.as_str(), "book checked in");
        Ok(checkout)
    }
}


#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use crate::books::dto::BookDto;
    use crate::catalog::domain::CatalogService;
    use crate::catalog::factory::create_catalog_service;
    use crate::checkout::domain::CheckoutService;
    use crate::checkout::domain::service::CheckoutServiceImpl;
    use crate::checkout::factory;
    use crate::core::domain::Configuration;
    use crate::core::events::DomainEventType;
    use crate::core::library::{CheckoutStatus, LibraryError, LibraryResult};
    use crate::core::repository::RepositoryStore;
    use crate::gateway::factory::create_publisher;
    use crate::patrons::domain::{Patron, PatronService};
    use crate::patrons::dto::PatronDto;
    use crate::patrons::factory::create_patron_service;

    struct Fixture {
        store: RepositoryStore,
        catalog: Box<dyn CatalogService>,
        patrons: Box<dyn PatronService>,
        checkout: Box<dyn CheckoutService>,
        patron: PatronDto,
        book: BookDto,
    }

    async fn fixture() -> Fixture {
        let store = RepositoryStore::new();
        let config = Configuration::new("test");
        let catalog = create_catalog_service(&config, &store);
        let patrons = create_patron_service(&config, &store);
        let checkout = factory::create_checkout_service(&config, &store);
        let patron = PatronDto::new("Alice");
        patrons.add_patron(&patron).await.expect("should add patron");
        let book = BookDto::printed("T1", "A1", "1234", 100, "hardcover");
        catalog.add_book(&book).await.expect("should add book");
        Fixture { store, catalog, patrons, checkout, patron, book }
    }

    // Patron side that refuses every change, to exercise the rollback paths.
    struct BrokenPatrons {
        inner: Box<dyn PatronService>,
    }

    #[async_trait]
    impl PatronService for BrokenPatrons {
        async fn add_patron(&self, patron: &PatronDto) -> LibraryResult<PatronDto> {
            self.inner.add_patron(patron).await
        }

        async fn update_patron(&self, patron: &PatronDto) -> LibraryResult<PatronDto> {
            self.inner.update_patron(patron).await
        }

        async fn find_patron_by_id(&self, id: &str) -> LibraryResult<PatronDto> {
            self.inner.find_patron_by_id(id).await
        }

        async fn borrow_book(&self, _patron_id: &str, _book_id: &str) -> LibraryResult<PatronDto> {
            Err(LibraryError::runtime("patron store offline", None))
        }

        async fn return_book(&self, _patron_id: &str, _book_id: &str) -> LibraryResult<bool> {
            Err(LibraryError::runtime("patron store offline", None))
        }

        async fn list_borrowed(&self, patron_id: &str) -> LibraryResult<Vec<BookDto>> {
            self.inner.list_borrowed(patron_id).await
        }
    }

    fn broken_checkout(store: &RepositoryStore) -> CheckoutServiceImpl {
        let config = Configuration::new("test");
        CheckoutServiceImpl::new(&config,
                                 Box::new(BrokenPatrons { inner: create_patron_service(&config, store) }),
                                 create_catalog_service(&config, store), create_publisher(store))
    }

    #[tokio::test]
    async fn test_should_checkout_and_returned() {
        let f = fixture().await;
        let patron_id = f.patron.patron_id.as_str();

        let res = f.checkout.returned(patron_id, "1234").await;
        assert!(res.is_err());

        let checkout = f.checkout.checkout(patron_id, "1234").await.expect("should checkout");
        assert_eq!(f.patron.patron_id, checkout.patron_id);
        assert_eq!(f.book.book_id, checkout.book_id);
        assert!(f.catalog.find_book_by_id(f.book.book_id.as_str()).await.expect("should load").lent);
        assert!(f.patrons.find_patron_by_id(patron_id).await.expect("should load").has_borrowed(f.book.book_id.as_str()));

        let returned = f.checkout.returned(patron_id, "1234").await.expect("should return");
        assert_eq!(CheckoutStatus::Returned, returned.checkout_status);
        assert!(!f.catalog.find_book_by_id(f.book.book_id.as_str()).await.expect("should load").lent);
        assert_eq!(0, f.patrons.find_patron_by_id(patron_id).await.expect("should load").borrowed_count());

        let events = create_publisher(&f.store).published().await.expect("should list events");
        let kinds: Vec<DomainEventType> = events.iter().map(|e| e.kind).collect();
        assert!(kinds.contains(&DomainEventType::BookCheckedOut));
        assert!(kinds.contains(&DomainEventType::BookCheckedIn));
    }

    #[tokio::test]
    async fn test_should_not_checkout_lent_book() {
        let f = fixture().await;
        let patron_id = f.patron.patron_id.as_str();
        f.checkout.checkout(patron_id, "1234").await.expect("should checkout");

        let again = f.checkout.checkout(patron_id, "1234").await;
        assert!(matches!(again, Err(LibraryError::CurrentlyUnavailable { .. })));
        assert_eq!(1, f.patrons.find_patron_by_id(patron_id).await.expect("should load").borrowed_count());
    }

    #[tokio::test]
    async fn test_should_not_checkout_unknown_book_or_patron() {
        let f = fixture().await;
        assert!(matches!(f.checkout.checkout(f.patron.patron_id.as_str(), "9999").await,
                         Err(LibraryError::NotFound { .. })));
        assert!(matches!(f.checkout.checkout("nobody", "1234").await,
                         Err(LibraryError::NotFound { .. })));
        assert!(!f.catalog.find_book_by_id(f.book.book_id.as_str()).await.expect("should load").lent);
    }

    #[tokio::test]
    async fn test_should_not_return_book_lent_outside_checkout() {
        let f = fixture().await;
        f.catalog.lend_book("1234").await.expect("should lend");

        let res = f.checkout.returned(f.patron.patron_id.as_str(), "1234").await;
        assert!(matches!(res, Err(LibraryError::Validation { .. })));
        assert!(f.catalog.find_book_by_id(f.book.book_id.as_str()).await.expect("should load").lent);
    }

    #[tokio::test]
    async fn test_should_rollback_lend_when_patron_fails() {
        let f = fixture().await;
        let res = broken_checkout(&f.store).checkout(f.patron.patron_id.as_str(), "1234").await;
        assert!(matches!(res, Err(LibraryError::Runtime { .. })));
        assert!(!f.catalog.find_book_by_id(f.book.book_id.as_str()).await.expect("should load").lent);
        assert_eq!(0, f.patrons.find_patron_by_id(f.patron.patron_id.as_str()).await.expect("should load").borrowed_count());
    }

    #[tokio::test]
    async fn test_should_rollback_return_when_patron_fails() {
        let f = fixture().await;
        f.checkout.checkout(f.patron.patron_id.as_str(), "1234").await.expect("should checkout");

        let res = broken_checkout(&f.store).returned(f.patron.patron_id.as_str(), "1234").await;
        assert!(matches!(res, Err(LibraryError::Runtime { .. })));
        assert!(f.catalog.find_book_by_id(f.book.book_id.as_str()).await.expect("should load").lent);
        assert!(f.patrons.find_patron_by_id(f.patron.patron_id.as_str()).await.expect("should load")
            .has_borrowed(f.book.book_id.as_str()));
    }
}
