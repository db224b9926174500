//! Overwrite registry entries with the ones a project's table file declares.

use jdksync_core::{table, JdkName, JdkRegistry, Project};

use crate::SyncError;

/// What one reconciliation pass did, per declared entry in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// Entries that replaced an existing registration.
    pub replaced: Vec<JdkName>,
    /// Entries that were not registered before.
    pub added: Vec<JdkName>,
}

impl ReconcileOutcome {
    pub fn is_empty(&self) -> bool {
        self.replaced.is_empty() && self.added.is_empty()
    }

    /// Every touched name, replaced first.
    pub fn names(&self) -> Vec<JdkName> {
        self.replaced.iter().chain(&self.added).cloned().collect()
    }
}

/// Re-read the table file and write every entry into the registry.
///
/// Each entry is removed (if registered) and then added, so the stored entry
/// is replaced whole. A later duplicate in the file replaces an earlier one.
/// The table is re-parsed here rather than taken from the comparison step.
pub fn apply(project: &Project, registry: &dyn JdkRegistry) -> Result<ReconcileOutcome, SyncError> {
    let declared = table::read_entries(project)?;
    let mut outcome = ReconcileOutcome::default();

    registry.write(&mut |jdks| {
        outcome = ReconcileOutcome::default();
        for entry in &declared {
            if jdks.remove(&entry.name).is_some() {
                tracing::info!("removed JDK from registry: {}", entry.name);
                outcome.replaced.push(entry.name.clone());
            } else {
                outcome.added.push(entry.name.clone());
            }
            jdks.add(entry.clone());
            tracing::info!(
                "added JDK from project table: {} ({})",
                entry.name,
                entry.home_path
            );
        }
    })?;

    Ok(outcome)
}
