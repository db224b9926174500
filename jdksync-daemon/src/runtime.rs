use std::path::{Path, PathBuf};
use std::sync::Arc;

use jdksync_core::{FileRegistry, JdkRegistry, Project};

use crate::config::WatchConfig;
use crate::error::{io_err, DaemonError};
use crate::notify::Notifier;
use crate::paths::registry_path;
use crate::scheduler::PollScheduler;

/// Start the poll loops and block the current thread until Ctrl-C.
pub fn start_blocking(
    home: &Path,
    config: WatchConfig,
    notifier: Arc<dyn Notifier>,
) -> Result<(), DaemonError> {
    init_tracing();
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| io_err("tokio-runtime", e))?;
    runtime.block_on(run(home.to_path_buf(), config, notifier))
}

/// Watch every configured project against the registry under `home` until
/// Ctrl-C, then cancel and join all loops.
pub async fn run(
    home: PathBuf,
    config: WatchConfig,
    notifier: Arc<dyn Notifier>,
) -> Result<(), DaemonError> {
    config.validate()?;
    if config.projects.is_empty() {
        return Err(DaemonError::InvalidConfig(
            "no projects to watch; pass a project path or run `jdksync project add <path>`"
                .to_string(),
        ));
    }

    let registry: Arc<dyn JdkRegistry> = Arc::new(FileRegistry::at(&home));
    tracing::info!(
        registry = %registry_path(&home).display(),
        projects = config.projects.len(),
        poll_interval_ms = config.poll_interval_ms,
        heartbeat_every = config.heartbeat_every,
        "starting background JDK settings checker",
    );

    let scheduler = PollScheduler::new(registry, notifier, config.settings());
    for path in &config.projects {
        let base = std::fs::canonicalize(path).unwrap_or_else(|_| path.clone());
        if !base.is_dir() {
            tracing::warn!(project = %base.display(), "project directory does not exist yet");
        }
        scheduler.start(Project::at(base));
    }

    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("received ctrl-c, shutting down"),
        Err(err) => tracing::error!(error = %err, "ctrl-c handler failed, shutting down"),
    }
    scheduler.shutdown().await
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}
