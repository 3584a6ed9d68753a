use async_trait::async_trait;
use tracing::info;
use crate::core::events::DomainEvent;
use crate::core::library::LibraryError;
use crate::gateway::events::EventPublisher;
use crate::utils::memory::MemoryTable;

// LogPublisher writes each domain event to the log and keeps it in the session journal.
#[derive(Debug)]
pub struct LogPublisher {
    journal: MemoryTable<DomainEvent>,
}

impl LogPublisher {
    pub(crate) fn new(journal: MemoryTable<DomainEvent>) -> Self {
        Self {
            journal,
        }
    }
}

#[async_trait]
impl EventPublisher for LogPublisher {
    async fn publish(&self, event: &DomainEvent) -> Result<(), LibraryError> {
        info!(event_id = event.event_id.as_str(), group = event.group.as_str(), kind = %event.kind,
            key = event.key.as_str(), data = event.json_data.as_str(), "domain event");
        self.journal.insert(event.clone()).await.map(|_| ())
    }

    async fn published(&self) -> Result<Vec<DomainEvent>, LibraryError> {
        Ok(self.journal.snapshot().await)
    }
}
