use std::str::FromStr;
use tracing::Level;
use crate::core::domain::Configuration;

pub(crate) fn parse_level(level: &str) -> Level {
    Level::from_str(level.trim()).unwrap_or(Level::WARN)
}

// Logs go to stderr as JSON so they never interleave with the menu on stdout.
pub fn setup_tracing(config: &Configuration) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(parse_level(config.log_level.as_str()))
        // disable printing the name of the module in every log line.
        .with_target(false)
        .with_ansi(false)
        .without_time()
        .json()
        .with_writer(std::io::stderr)
        .try_init();
}
