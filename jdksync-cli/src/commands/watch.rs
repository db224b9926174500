//! `jdksync watch` — run the poll loops in the foreground.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use jdksync_core::Project;
use jdksync_daemon::{start_blocking, Notice, Notifier, WatchConfig};

/// Arguments for `jdksync watch`.
#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Project roots to watch; defaults to the configured project list.
    pub projects: Vec<PathBuf>,

    /// Poll interval in milliseconds (overrides config).
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Poll wake-ups between liveness markers (overrides config).
    #[arg(long)]
    pub heartbeat_every: Option<u32>,
}

impl WatchArgs {
    pub fn run(self) -> Result<()> {
        let home = super::home_dir()?;
        let config = self.into_config(
            WatchConfig::load_at(&home).context("failed to load jdksync config")?,
        );
        start_blocking(&home, config, Arc::new(TerminalNotifier))
            .context("watcher exited with error")
    }

    fn into_config(self, mut config: WatchConfig) -> WatchConfig {
        if !self.projects.is_empty() {
            config.projects = self.projects;
        }
        if let Some(ms) = self.interval_ms {
            config.poll_interval_ms = ms;
        }
        if let Some(every) = self.heartbeat_every {
            config.heartbeat_every = every;
        }
        config
    }
}

/// Prints notices as a banner on stdout.
struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, project: &Project, notice: &Notice) {
        println!(
            "{} [{}] {}",
            format!("■ {}", notice.title).green().bold(),
            project.name,
            notice.message
        );
    }
}
