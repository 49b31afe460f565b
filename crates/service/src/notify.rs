use tracing::error;

use crate::errors::ApiError;

/// Receives failures that read actions report to the user instead of
/// returning them.
pub trait Notifier: Send + Sync {
    fn notify(&self, context: &str, error: &ApiError);
}

/// Logs the failure and nothing else.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, context: &str, error: &ApiError) {
        error!(%error, "{context}");
    }
}
