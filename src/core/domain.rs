use std::env;
use serde::{Deserialize, Serialize};

// Identifiable defines common traits that can be shared by stored objects
pub trait Identifiable: Sync + Send {
    fn id(&self) -> String;
    fn version(&self) -> i64;
}

pub const DEFAULT_BRANCH_ID: &str = "main";
pub const DEFAULT_PAGE_SIZE: usize = 100;
pub const DEFAULT_LOG_LEVEL: &str = "warn";

// Configuration abstracts config options for the library console
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Configuration {
    pub branch_id: String,
    // page size used when walking the catalog
    pub page_size: usize,
    pub log_level: String,
}

impl Configuration {
    pub fn new(branch_id: &str) -> Self {
        Configuration {
            branch_id: branch_id.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }

    // Reads LMS_BRANCH_ID, LMS_PAGE_SIZE and LMS_LOG_LEVEL, keeping defaults for
    // anything missing or unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let mut config = Configuration::new(
            lookup("LMS_BRANCH_ID").as_deref().unwrap_or(DEFAULT_BRANCH_ID));
        if let Some(page_size) = lookup("LMS_PAGE_SIZE").and_then(|s| s.trim().parse::<usize>().ok()) {
            if page_size > 0 {
                config.page_size = page_size;
            }
        }
        if let Some(level) = lookup("LMS_LOG_LEVEL") {
            config.log_level = level.trim().to_lowercase();
        }
        config
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration::new(DEFAULT_BRANCH_ID)
    }
}
