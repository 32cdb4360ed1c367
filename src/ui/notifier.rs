use tracing::error;

/// Blocking, user-facing failure notification (a message box in a GUI).
///
/// Implementations return only once the user has been told, and may block
/// while doing so. View models call this on Tokio's blocking pool, never on a
/// runtime worker; a GUI implementation that must run on its own UI thread
/// should marshal the call there and wait for it.
pub trait ErrorNotifier: Send + Sync + std::fmt::Debug {
    fn notify_error(&self, title: &str, message: &str);
}

/// Reports failures through the log only.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl ErrorNotifier for LogNotifier {
    fn notify_error(&self, title: &str, message: &str) {
        error!("{}: {}", title, message);
    }
}
