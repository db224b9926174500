//! User-facing notification channel.

use jdksync_core::Project;

pub const UPDATED_TITLE: &str = "Update JDKs";
pub const UPDATED_MESSAGE: &str =
    "Updated your JDK settings. You should be able to see your JDK settings change soon.";

/// An informational message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    /// The notice raised after a successful reconciliation.
    pub fn jdks_updated() -> Self {
        Self::new(UPDATED_TITLE, UPDATED_MESSAGE)
    }
}

/// Presents notices to the user. Fire-and-forget: implementations must not
/// block on or report delivery failures.
pub trait Notifier: Send + Sync {
    fn notify(&self, project: &Project, notice: &Notice);
}

/// Logs notices at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, project: &Project, notice: &Notice) {
        tracing::info!(
            project = %project.name,
            title = %notice.title,
            "{}",
            notice.message
        );
    }
}
