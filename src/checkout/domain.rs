use async_trait::async_trait;
use crate::checkout::dto::CheckoutDto;
use crate::core::library::LibraryResult;

pub mod service;

// CheckoutService is the only place that changes a book's lent state and a patron's
// borrowed list together.
#[async_trait]
pub trait CheckoutService: Sync + Send {
    async fn checkout(&self, patron_id: &str, isbn: &str) -> LibraryResult<CheckoutDto>;
    async fn returned(&self, patron_id: &str, isbn: &str) -> LibraryResult<CheckoutDto>;
}
