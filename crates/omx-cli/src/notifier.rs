//! Console notification sink.

use omx_core::{Notification, NotificationSink};
use tracing::debug;

/// Prints notifications to stderr, keeping stdout for command output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier {
    quiet: bool,
}

impl ConsoleNotifier {
    pub const fn new() -> Self {
        Self { quiet: false }
    }

    /// Suppress success messages; failures are always printed.
    #[must_use]
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    const fn is_failure(notification: &Notification) -> bool {
        matches!(
            notification,
            Notification::AggregationFailed { .. } | Notification::ExportFailed { .. }
        )
    }
}

impl NotificationSink for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        debug!(?notification, "Notification");
        if Self::is_failure(&notification) {
            eprintln!("✗ {notification}");
        } else if !self.quiet {
            eprintln!("✓ {notification}");
        }
    }
}
