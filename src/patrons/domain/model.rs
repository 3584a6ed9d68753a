use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::domain::Identifiable;
use crate::patrons::domain::Patron;
use crate::utils::date::serializer;
use crate::utils::memory::Queryable;

// PatronEntity is the stored form of a library member. Borrowed books are kept as book ids;
// the catalog stays the only owner of book state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatronEntity {
    pub patron_id: String,
    pub version: i64,
    pub name: String,
    pub borrowed_book_ids: Vec<String>,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl PatronEntity {
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

    pub fn borrow(&mut self, book_id: &str) {
        self.borrowed_book_ids.push(book_id.to_string());
    }

    // drops the first matching id
    pub fn return_book(&mut self, book_id: &str) -> bool {
        if let Some(pos) = self.borrowed_book_ids.iter().position(|id| id == book_id) {
            self.borrowed_book_ids.remove(pos);
            true
        } else {
            false
        }
    }
}

impl Identifiable for PatronEntity {
    fn id(&self) -> String {
        self.patron_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

impl Patron for PatronEntity {
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

impl Queryable for PatronEntity {
    fn attribute(&self, name: &str) -> Option<String> {
        match name {
            "patron_id" => Some(self.patron_id.to_string()),
            "name" => Some(self.name.to_string()),
            _ => None,
        }
    }
}
