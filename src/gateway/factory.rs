use crate::core::repository::RepositoryStore;
use crate::gateway::events::EventPublisher;
use crate::gateway::logs::publisher::LogPublisher;

pub(crate) fn create_publisher(store: &RepositoryStore) -> Box<dyn EventPublisher> {
    Box::new(LogPublisher::new(store.events.clone()))
}
