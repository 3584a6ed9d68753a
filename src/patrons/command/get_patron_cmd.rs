use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::core::command::{Command, CommandError};
use crate::patrons::domain::PatronService;
use crate::patrons::dto::PatronDto;

pub(crate) struct GetPatronCommand {
    patron_service: Box<dyn PatronService>,
}

impl GetPatronCommand {
    pub(crate) fn new(patron_service: Box<dyn PatronService>) -> Self {
        Self {
            patron_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GetPatronCommandRequest {
    pub patron_id: String,
}

impl GetPatronCommandRequest {
    pub fn new(patron_id: &str) -> Self {
        Self {
            patron_id: patron_id.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct GetPatronCommandResponse {
    pub patron: PatronDto,
    // borrowed books still present in the catalog, in borrowing order
    pub borrowed: Vec<BookDto>,
}

#[async_trait]
impl Command<GetPatronCommandRequest, GetPatronCommandResponse> for GetPatronCommand {
    async fn execute(&self, req: GetPatronCommandRequest) -> Result<GetPatronCommandResponse, CommandError> {
        let patron = self.patron_service.find_patron_by_id(req.patron_id.as_str()).await?;
        let borrowed = self.patron_service.list_borrowed(req.patron_id.as_str()).await?;
        Ok(GetPatronCommandResponse { patron, borrowed })
    }
}
