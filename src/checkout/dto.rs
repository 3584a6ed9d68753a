use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::books::domain::Book;
use crate::core::library::CheckoutStatus;
use crate::patrons::domain::Patron;
use crate::utils::date::serializer;


// CheckoutDto describes one hand-over of a book to or from a patron.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct CheckoutDto {
    pub checkout_id: String,
    pub branch_id: String,
    pub book_id: String,
    pub isbn: String,
    pub patron_id: String,
    pub checkout_status: CheckoutStatus,
    #[serde(with = "serializer")]
    pub recorded_at: NaiveDateTime,
}

impl CheckoutDto {
    pub fn from_patron_book(branch_id: &str, patron: &dyn Patron, book: &dyn Book, status: CheckoutStatus) -> Self {
        CheckoutDto {
            checkout_id: Uuid::new_v4().to_string(),
            branch_id: branch_id.to_string(),
            book_id: book.id(),
            isbn: book.isbn().to_string(),
            patron_id: patron.id(),
            checkout_status: status,
            recorded_at: Utc::now().naive_utc(),
        }
    }
}
