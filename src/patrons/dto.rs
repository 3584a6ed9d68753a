use chrono::{NaiveDateTime, Utc};
use uuid::Uuid;
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::patrons::domain::model::PatronEntity;
use crate::patrons::domain::Patron;


// PatronDto abstracts the registered library member.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct PatronDto {
    pub patron_id: String,
    pub version: i64,
    pub name: String,
    pub borrowed_book_ids: Vec<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl PatronDto {
    pub fn new(name: &str) -> Self {
        Self {
            patron_id: Uuid::new_v4().to_string(),
            version: 0,
            name: name.to_string(),
            borrowed_book_ids: vec![],
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl Identifiable for PatronDto {
    fn id(&self) -> String {
        self.patron_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

impl Patron for PatronDto {
    fn name(&self) -> &str {
        self.name.as_str()
    }

    fn has_borrowed(&self, book_id: &str) -> bool {
        self.borrowed_book_ids.iter().any(|id| id == book_id)
    }

    fn borrowed_count(&self) -> usize {
        self.borrowed_book_ids.len()
    }
}

impl From<&PatronEntity> for PatronDto {
    fn from(other: &PatronEntity) -> Self {
        Self {
            patron_id: other.patron_id.to_string(),
            version: other.version,
            name: other.name.to_string(),
            borrowed_book_ids: other.borrowed_book_ids.clone(),
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

impl From<&PatronDto> for PatronEntity {
    fn from(other: &PatronDto) -> Self {
        Self {
            patron_id: other.patron_id.to_string(),
            version: other.version,
            name: other.name.to_string(),
            borrowed_book_ids: other.borrowed_book_ids.clone(),
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}
