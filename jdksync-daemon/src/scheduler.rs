//! Per-project poll loops.
//!
//! Each started project gets one tokio task that repeats
//! `run_once → wait(poll_interval)` until cancelled. The cycle itself runs on
//! the blocking pool; the wait is the only point where cancellation is seen,
//! so an in-flight reconciliation always completes.
//!
//! Starting a project that already has a loop cancels the old loop and
//! replaces it; the replacement starts with fresh detector and heartbeat
//! state.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use jdksync_core::{JdkRegistry, Project};

use crate::cycle::PollCycle;
use crate::error::DaemonError;
use crate::notify::Notifier;
use crate::paths::{DEFAULT_HEARTBEAT_EVERY, DEFAULT_POLL_INTERVAL};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub poll_interval: Duration,
    pub heartbeat_every: u32,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            heartbeat_every: DEFAULT_HEARTBEAT_EVERY,
        }
    }
}

/// Identifies one started loop; a restart gets a new id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunId(pub u64);

struct ActiveRun {
    id: RunId,
    cancel: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl ActiveRun {
    fn cancel(self) -> JoinHandle<()> {
        // A closed receiver means the loop already exited.
        let _ = self.cancel.send(true);
        self.handle
    }
}

/// Counts a loop as live from spawn until its task is dropped.
struct LiveGuard(Arc<AtomicUsize>);

impl LiveGuard {
    fn new(live: Arc<AtomicUsize>) -> Self {
        live.fetch_add(1, Ordering::SeqCst);
        Self(live)
    }
}

impl Drop for LiveGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

pub struct PollScheduler {
    registry: Arc<dyn JdkRegistry>,
    notifier: Arc<dyn Notifier>,
    settings: PollSettings,
    runs: Mutex<HashMap<PathBuf, ActiveRun>>,
    /// Cancelled loops that may still be finishing a cycle.
    retired: Mutex<Vec<JoinHandle<()>>>,
    next_id: AtomicU64,
    live: Arc<AtomicUsize>,
}

impl PollScheduler {
    pub fn new(
        registry: Arc<dyn JdkRegistry>,
        notifier: Arc<dyn Notifier>,
        settings: PollSettings,
    ) -> Self {
        Self {
            registry,
            notifier,
            settings,
            runs: Mutex::new(HashMap::new()),
            retired: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            live: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn settings(&self) -> PollSettings {
        self.settings
    }

    /// Start (or restart) the loop for `project`. Must be called inside a
    /// tokio runtime; returns without waiting for the first cycle.
    pub fn start(&self, project: Project) -> RunId {
        let id = RunId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let key = project.base_path.clone();
        let cycle = PollCycle::new(
            project,
            self.registry.clone(),
            self.notifier.clone(),
            self.settings.heartbeat_every,
        );
        let (cancel_tx, cancel_rx) = watch::channel(false);

        let mut runs = self.lock_runs();
        if let Some(previous) = runs.remove(&key) {
            tracing::info!(
                project = %key.display(),
                previous = previous.id.0,
                next = id.0,
                "replacing active poll loop",
            );
            let handle = previous.cancel();
            self.retire(handle);
        }

        let live = LiveGuard::new(self.live.clone());
        let handle = tokio::spawn(poll_loop(
            id,
            cycle,
            self.settings.poll_interval,
            cancel_rx,
            live,
        ));
        runs.insert(
            key,
            ActiveRun {
                id,
                cancel: cancel_tx,
                handle,
            },
        );
        id
    }

    /// Cancel the loop for `base_path`. Returns `false` if none was active.
    pub fn cancel(&self, base_path: &Path) -> bool {
        let Some(run) = self.lock_runs().remove(base_path) else {
            return false;
        };
        tracing::info!(project = %base_path.display(), run = run.id.0, "cancelling poll loop");
        let handle = run.cancel();
        self.retire(handle);
        true
    }

    pub fn is_running(&self, base_path: &Path) -> bool {
        self.lock_runs()
            .get(base_path)
            .map(|run| !run.handle.is_finished())
            .unwrap_or(false)
    }

    pub fn current_run(&self, base_path: &Path) -> Option<RunId> {
        self.lock_runs().get(base_path).map(|run| run.id)
    }

    /// Base paths with a non-cancelled loop, sorted.
    pub fn active_projects(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self.lock_runs().keys().cloned().collect();
        paths.sort();
        paths
    }

    /// Loop tasks that have not exited yet, including cancelled ones still
    /// finishing their current cycle.
    pub fn live_loops(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    /// Cancel every loop and wait for all of them to exit.
    pub async fn shutdown(&self) -> Result<(), DaemonError> {
        let mut handles: Vec<JoinHandle<()>> = self
            .lock_runs()
            .drain()
            .map(|(_, run)| run.cancel())
            .collect();
        handles.append(&mut self.lock_retired());

        let mut first_err = None;
        for handle in handles {
            if let Err(err) = handle.await {
                tracing::error!(error = %err, "poll loop join failure");
                first_err.get_or_insert(DaemonError::Join {
                    task: "poll_loop".to_string(),
                    message: err.to_string(),
                });
            }
        }
        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn retire(&self, handle: JoinHandle<()>) {
        let mut retired = self.lock_retired();
        retired.retain(|h| !h.is_finished());
        retired.push(handle);
    }

    fn lock_runs(&self) -> MutexGuard<'_, HashMap<PathBuf, ActiveRun>> {
        self.runs.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock_retired(&self) -> MutexGuard<'_, Vec<JoinHandle<()>>> {
        self.retired.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

async fn poll_loop(
    id: RunId,
    cycle: PollCycle,
    poll_interval: Duration,
    mut cancel: watch::Receiver<bool>,
    _live: LiveGuard,
) {
    let project = cycle.project().name.clone();
    tracing::info!(project = %project, run = id.0, "starting JDK settings poll loop");

    // Shared with the blocking pool; only one cycle ever holds it.
    let cycle = Arc::new(Mutex::new(cycle));
    loop {
        if *cancel.borrow() {
            break;
        }

        let worker = cycle.clone();
        let report = tokio::task::spawn_blocking(move || {
            worker
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .run_once()
        })
        .await;
        match report {
            Ok(report) => {
                tracing::debug!(project = %project, run = id.0, report = ?report, "poll cycle finished")
            }
            Err(err) => {
                tracing::error!(project = %project, run = id.0, error = %err, "poll cycle panicked")
            }
        }

        tokio::select! {
            // Changed to `true`, or the scheduler dropped the sender.
            _ = cancel.changed() => break,
            _ = tokio::time::sleep(poll_interval) => {}
        }
    }

    tracing::info!(project = %project, run = id.0, "poll loop stopped");
}
