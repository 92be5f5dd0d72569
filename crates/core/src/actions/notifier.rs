//! Notification sink for user-facing toasts.

use tracing::{error, info, warn};

/// Receives the outcome messages of user actions.
pub trait Notifier: Send {
    fn success(&self, message: &str);
    fn info(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
}

/// Notifier that forwards everything to the tracing pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        info!(kind = "success", "{message}");
    }

    fn info(&self, message: &str) {
        info!(kind = "info", "{message}");
    }

    fn warning(&self, message: &str) {
        warn!(kind = "warning", "{message}");
    }

    fn error(&self, message: &str) {
        error!(kind = "error", "{message}");
    }
}
