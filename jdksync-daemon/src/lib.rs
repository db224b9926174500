//! Background poll loop: heartbeat + change detection + reconciliation, one
//! cancellable tokio task per project.

pub mod config;
pub mod cycle;
mod error;
pub mod heartbeat;
pub mod notify;
pub mod paths;
mod runtime;
pub mod scheduler;

pub use config::WatchConfig;
pub use cycle::{CycleReport, PollCycle};
pub use error::DaemonError;
pub use heartbeat::Heartbeat;
pub use notify::{Notice, Notifier, TracingNotifier};
pub use runtime::{run, start_blocking};
pub use scheduler::{PollScheduler, PollSettings, RunId};
