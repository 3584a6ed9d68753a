use async_trait::async_trait;
use crate::core::events::DomainEvent;
use crate::core::library::LibraryError;

#[async_trait]
pub trait EventPublisher: Sync + Send {
    async fn publish(&self, event: &DomainEvent) -> Result<(), LibraryError>;

    // events published so far, oldest first
    async fn published(&self) -> Result<Vec<DomainEvent>, LibraryError>;
}
