use tracing::{debug, error};
use crate::core::command::CommandError;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;

// AppState is everything a session needs; it is passed explicitly instead of living in globals.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Configuration,
    pub store: RepositoryStore,
}

impl AppState {
    pub fn new(config: Configuration) -> AppState {
        AppState {
            config,
            store: RepositoryStore::new(),
        }
    }
}

// Returns true when the error is an ordinary outcome the user can act on (missing book,
// book already lent...), false when something inside the system went wrong.
pub(crate) fn log_command_error(action: &str, err: &CommandError) -> bool {
    match err {
        CommandError::NotFound { .. } | CommandError::Validation { .. } | CommandError::Unavailable { .. } => {
            debug!(action, error = %err, "command rejected");
            true
        }
        CommandError::DuplicateKey { .. } | CommandError::Runtime { .. } | CommandError::Serialization { .. } => {
            error!(action, error = %err, "command failed");
            false
        }
    }
}
