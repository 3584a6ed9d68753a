use std::collections::HashMap;
use std::fmt;
use std::fmt::{Display, Formatter};
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::domain::Identifiable;
use crate::utils::date::serializer;

// DomainEventType names the state change an event records
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum DomainEventType {
    BookAdded,
    BookUpdated,
    BookRemoved,
    BookLent,
    BookReturned,
    PatronRegistered,
    PatronUpdated,
    BookCheckedOut,
    BookCheckedIn,
}

impl DomainEventType {
    pub fn group(&self) -> &'static str {
        match self {
            DomainEventType::BookAdded | DomainEventType::BookUpdated | DomainEventType::BookRemoved => "catalog",
            DomainEventType::BookLent | DomainEventType::BookReturned => "lending",
            DomainEventType::PatronRegistered | DomainEventType::PatronUpdated => "patrons",
            DomainEventType::BookCheckedOut | DomainEventType::BookCheckedIn => "checkout",
        }
    }
}

impl Display for DomainEventType {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// DomainEvent records a change to catalog, patron or lending state
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    pub event_id: String,
    pub kind: DomainEventType,
    pub group: String,
    // id of the record that changed
    pub key: String,
    pub metadata: HashMap<String, String>,
    pub json_data: String,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
}

impl DomainEvent {
    pub fn new<T: Serialize>(kind: DomainEventType, key: &str, branch_id: &str, data: &T) -> serde_json::Result<Self> {
        let json_data = serde_json::to_string(data)?;
        Ok(DomainEvent {
            event_id: Uuid::new_v4().to_string(),
            kind,
            group: kind.group().to_string(),
            key: key.to_string(),
            metadata: HashMap::from([("branch_id".to_string(), branch_id.to_string())]),
            json_data,
            created_at: Utc::now().naive_utc(),
        })
    }
}

impl Identifiable for DomainEvent {
    fn id(&self) -> String {
        self.event_id.to_string()
    }

    fn version(&self) -> i64 {
        0
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use crate::core::events::{DomainEvent, DomainEventType};

    #[tokio::test]
    async fn test_should_build_event() {
        let data = HashMap::from([("isbn", "1234")]);
        let event = DomainEvent::new(DomainEventType::BookLent, "book1", "main", &data).expect("build event");
        assert_eq!("book1", event.key.as_str());
        assert_eq!("lending", event.group.as_str());
        assert_eq!(Some(&"main".to_string()), event.metadata.get("branch_id"));
        assert_eq!(r#"{"isbn":"1234"}"#, event.json_data.as_str());
    }

    #[tokio::test]
    async fn test_should_group_events() {
        assert_eq!("catalog", DomainEventType::BookRemoved.group());
        assert_eq!("patrons", DomainEventType::PatronRegistered.group());
        assert_eq!("checkout", DomainEventType::BookCheckedIn.group());
        assert_eq!("BookAdded", DomainEventType::BookAdded.to_string());
    }

    #[tokio::test]
    async fn test_should_serialize_event() {
        let event = DomainEvent::new(DomainEventType::PatronRegistered, "p1", "main", &"Alice").expect("build event");
        let json = serde_json::to_string(&event).expect("should serialize");
        let back: DomainEvent = serde_json::from_str(json.as_str()).expect("should deserialize");
        assert_eq!(event.event_id, back.event_id);
        assert_eq!(event.kind, back.kind);
    }
}
