//! One poll iteration for one project.
//!
//! Step order:
//! 1. Heartbeat tick → `health_check` marker when due
//! 2. Change detected and registry diverged → reconcile → notify → `updated` marker
//!
//! Every step failure is logged and the step abandoned; [`PollCycle::run_once`]
//! never fails, so the scheduler survives any single bad cycle.

use std::sync::Arc;

use jdksync_core::{table, JdkName, JdkRegistry, Project};
use jdksync_sync::{compare, marker, reconcile, ChangeDetector, SyncError};

use crate::heartbeat::Heartbeat;
use crate::notify::{Notice, Notifier};

/// What happened during one [`PollCycle::run_once`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// The heartbeat was due this tick (marker write may still have failed).
    pub heartbeat: bool,
    /// The change detector reported a change.
    pub changed: bool,
    /// Names written into the registry; empty when nothing was reconciled.
    pub reconciled: Vec<JdkName>,
}

/// Per-run state plus the injected collaborators for one project.
pub struct PollCycle {
    project: Project,
    registry: Arc<dyn JdkRegistry>,
    notifier: Arc<dyn Notifier>,
    detector: ChangeDetector,
    heartbeat: Heartbeat,
}

impl PollCycle {
    pub fn new(
        project: Project,
        registry: Arc<dyn JdkRegistry>,
        notifier: Arc<dyn Notifier>,
        heartbeat_every: u32,
    ) -> Self {
        Self {
            project,
            registry,
            notifier,
            detector: ChangeDetector::new(),
            heartbeat: Heartbeat::new(heartbeat_every),
        }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn detector(&self) -> &ChangeDetector {
        &self.detector
    }

    pub fn run_once(&mut self) -> CycleReport {
        let mut report = CycleReport::default();

        if self.heartbeat.tick() {
            report.heartbeat = true;
            tracing::info!(
                project = %self.project.name,
                "JDK settings checker is still alive and checking for changes",
            );
            // Failure already logged by the marker writer.
            let _ = marker::stamp(&self.project, table::HEALTH_CHECK_SUFFIX);
        }

        let table_path = table::table_file(&self.project);
        // The digest is recorded here, so a failed pass below is not retried
        // until the file changes again or the loop restarts.
        report.changed = self.detector.check(&table_path).is_change();
        if !report.changed {
            return report;
        }

        match self.reconcile_if_diverged() {
            Ok(names) => report.reconciled = names,
            Err(err) => {
                tracing::error!(
                    project = %self.project.name,
                    error = %err,
                    "JDK settings check failed; retrying next cycle",
                );
            }
        }
        report
    }

    fn reconcile_if_diverged(&self) -> Result<Vec<JdkName>, SyncError> {
        if !compare::has_divergence(&self.project, self.registry.as_ref())? {
            tracing::debug!(project = %self.project.name, "registry already matches JDK table");
            return Ok(Vec::new());
        }

        let outcome = reconcile::apply(&self.project, self.registry.as_ref())?;
        tracing::info!(
            project = %self.project.name,
            replaced = outcome.replaced.len(),
            added = outcome.added.len(),
            "registry reconciled from JDK table",
        );
        self.notifier.notify(&self.project, &Notice::jdks_updated());
        if let Err(err) = marker::stamp(&self.project, table::UPDATED_SUFFIX) {
            tracing::warn!(project = %self.project.name, error = %err, "updated marker not written");
        }
        Ok(outcome.names())
    }
}
