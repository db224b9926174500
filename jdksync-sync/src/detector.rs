//! Digest-based change detection for the JDK table file.
//!
//! Outcome precedence per check:
//! 1. `Absent` (no digest: file missing or unreadable) — not a change
//! 2. `FirstObservation` (no baseline yet) — a change
//! 3. `Changed` (digest differs from baseline) — a change
//! 4. `Unchanged`

use std::path::Path;

use crate::hasher::hash_file;

/// Classification of one check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observation {
    Absent,
    FirstObservation,
    Changed,
    Unchanged,
}

impl Observation {
    /// True for the outcomes that warrant a reconciliation attempt.
    pub fn is_change(&self) -> bool {
        matches!(self, Observation::FirstObservation | Observation::Changed)
    }
}

/// Holds the last digest seen during one scheduler run.
///
/// The baseline is only ever replaced, never cleared; a fresh detector is
/// created whenever the scheduler (re)starts.
#[derive(Debug, Clone, Default)]
pub struct ChangeDetector {
    last_digest: Option<String>,
}

impl ChangeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_digest(&self) -> Option<&str> {
        self.last_digest.as_deref()
    }

    /// Hash `path` and classify it against the stored baseline.
    pub fn check(&mut self, path: &Path) -> Observation {
        self.observe(hash_file(path))
    }

    /// Classify an already-computed digest.
    pub fn observe(&mut self, digest: Option<String>) -> Observation {
        let Some(current) = digest else {
            tracing::debug!("no JDK table present; reporting unchanged");
            return Observation::Absent;
        };
        match self.last_digest.as_deref() {
            None => {
                tracing::debug!("initial run; reporting JDK table as changed");
                self.last_digest = Some(current);
                Observation::FirstObservation
            }
            Some(previous) if previous != current => {
                tracing::info!("JDK table file has changed");
                self.last_digest = Some(current);
                Observation::Changed
            }
            Some(_) => {
                tracing::debug!("JDK table file has not changed");
                Observation::Unchanged
            }
        }
    }
}
