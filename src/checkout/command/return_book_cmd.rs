use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::checkout::domain::CheckoutService;
use crate::checkout::dto::CheckoutDto;
use crate::core::command::{Command, CommandError};

pub(crate) struct ReturnBookCommand {
    checkout_service: Box<dyn CheckoutService>,
}

impl ReturnBookCommand {
    pub(crate) fn new(checkout_service: Box<dyn CheckoutService>) -> Self {
        Self {
            checkout_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReturnBookCommandRequest {
    patron_id: String,
    isbn: String,
}

impl ReturnBookCommandRequest {
    pub fn new(patron_id: &str, isbn: &str) -> Self {
        Self {
            patron_id: patron_id.to_string(),
            isbn: isbn.to_string(),
        }
    }
}


#[derive(Debug, Serialize)]
pub(crate) struct ReturnBookCommandResponse {
    pub(crate) checkout: CheckoutDto,
}

impl ReturnBookCommandResponse {
    pub fn new(checkout: CheckoutDto) -> Self {
        Self {
            checkout,
        }
    }
}

#[async_trait]
impl Command<ReturnBookCommandRequest, ReturnBookCommandResponse> for ReturnBookCommand {
    async fn execute(&self, req: ReturnBookCommandRequest) -> Result<ReturnBookCommandResponse, CommandError> {
        self.checkout_service.returned(req.patron_id.as_str(), req.isbn.as_str())
            .await.map_err(CommandError::from).map(ReturnBookCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use crate::books::dto::BookDto;
    use crate::catalog::factory::create_catalog_service;
    use crate::checkout::command::checkout_book_cmd::{CheckoutBookCommand, CheckoutBookCommandRequest};
    use crate::checkout::command::return_book_cmd::{ReturnBookCommand, ReturnBookCommandRequest};
    use crate::checkout::factory::create_checkout_service;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::library::CheckoutStatus;
    use crate::core::repository::RepositoryStore;
    use crate::patrons::dto::PatronDto;
    use crate::patrons::factory::create_patron_service;

    #[tokio::test]
    async fn test_should_run_return_book() {
        let store = RepositoryStore::new();
        let config = Configuration::new("test");
        let patron = PatronDto::new("Alice");
        create_patron_service(&config, &store).add_patron(&patron).await.expect("should add patron");
        create_catalog_service(&config, &store).add_book(&BookDto::electronic("T1", "A1", "1234", 2.0, "PDF"))
            .await.expect("should add book");

        let return_cmd = ReturnBookCommand::new(create_checkout_service(&config, &store));
        let early = return_cmd.execute(ReturnBookCommandRequest::new(patron.patron_id.as_str(), "1234")).await;
        assert!(matches!(early, Err(CommandError::Validation { .. })));

        CheckoutBookCommand::new(create_checkout_service(&config, &store))
            .execute(CheckoutBookCommandRequest::new(patron.patron_id.as_str(), "1234")).await.expect("should checkout");
        let res = return_cmd.execute(ReturnBookCommandRequest::new(patron.patron_id.as_str(), "1234"))
            .await.expect("should return book");
        assert_eq!(CheckoutStatus::Returned, res.checkout.checkout_status);
    }
}
