//! Mock notification sink recording everything it is told.

use std::sync::{Arc, Mutex};

use crate::actions::Notifier;

/// Severity of a recorded notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// Recording notifier; clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct MockNotifier {
    log: Arc<Mutex<Vec<(NotifyLevel, String)>>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, level: NotifyLevel, message: &str) {
        self.log.lock().unwrap().push((level, message.to_string()));
    }

    /// Everything recorded so far, in order.
    pub fn entries(&self) -> Vec<(NotifyLevel, String)> {
        self.log.lock().unwrap().clone()
    }

    /// Messages recorded at `level`, in order.
    pub fn messages_at(&self, level: NotifyLevel) -> Vec<String> {
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.messages_at(NotifyLevel::Warning)
    }

    pub fn errors(&self) -> Vec<String> {
        self.messages_at(NotifyLevel::Error)
    }

    pub fn clear(&self) {
        self.log.lock().unwrap().clear();
    }
}

impl Notifier for MockNotifier {
    fn success(&self, message: &str) {
        self.record(NotifyLevel::Success, message);
    }

    fn info(&self, message: &str) {
        self.record(NotifyLevel::Info, message);
    }

    fn warning(&self, message: &str) {
        self.record(NotifyLevel::Warning, message);
    }

    fn error(&self, message: &str) {
        self.record(NotifyLevel::Error, message);
    }
}
