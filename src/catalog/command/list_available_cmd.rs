use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct ListAvailableBooksCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl ListAvailableBooksCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListAvailableBooksCommandRequest {}

#[derive(Debug, Serialize)]
pub(crate) struct ListAvailableBooksCommandResponse {
    pub books: Vec<BookDto>,
}

#[async_trait]
impl Command<ListAvailableBooksCommandRequest, ListAvailableBooksCommandResponse> for ListAvailableBooksCommand {
    async fn execute(&self, _req: ListAvailableBooksCommandRequest) -> Result<ListAvailableBooksCommandResponse, CommandError> {
        self.catalog_service.list_available().await
            .map_err(CommandError::from).map(|books| ListAvailableBooksCommandResponse { books })
    }
}
