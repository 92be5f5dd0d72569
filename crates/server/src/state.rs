use std::sync::{Mutex, MutexGuard};

use tickethealth_core::{Config, LocalTicketRepo};

/// Shared application state
pub struct AppState {
    config: Config,
    repo: Mutex<LocalTicketRepo>,
}

impl AppState {
    pub fn new(config: Config, repo: LocalTicketRepo) -> Self {
        Self {
            config,
            repo: Mutex::new(repo),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn repo(&self) -> MutexGuard<'_, LocalTicketRepo> {
        self.repo.lock().unwrap()
    }
}
