use std::io;
use lms::core::controller::AppState;
use lms::core::domain::Configuration;
use lms::core::library::LibraryError;
use lms::session::console::Console;
use lms::session::controller::LibrarySession;
use lms::utils::logs::setup_tracing;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), LibraryError> {
    let config = Configuration::from_env();
    setup_tracing(&config);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());
    LibrarySession::new(AppState::new(config)).run(&mut console).await
}
