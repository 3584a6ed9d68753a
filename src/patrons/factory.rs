use crate::books::factory::create_book_repository;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::gateway::factory::create_publisher;
use crate::patrons::domain::PatronService;
use crate::patrons::domain::service::PatronServiceImpl;
use crate::patrons::repository::PatronRepository;
use crate::patrons::repository::memory_patron_repository::MemoryPatronRepository;

pub(crate) fn create_patron_repository(store: &RepositoryStore) -> Box<dyn PatronRepository> {
    Box::new(MemoryPatronRepository::new(store.patrons.clone()))
}

pub(crate) fn create_patron_service(config: &Configuration, store: &RepositoryStore) -> Box<dyn PatronService> {
    Box::new(PatronServiceImpl::new(config, create_patron_repository(store),
                                    create_book_repository(store), create_publisher(store)))
}
