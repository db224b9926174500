//! # jdksync-sync
//!
//! Change detection and reconciliation between a project's JDK table file and
//! the live registry.
//!
//! One pass is: [`ChangeDetector::check`] → [`compare::has_divergence`] →
//! [`reconcile::apply`] → [`marker::write_marker`].

pub mod compare;
pub mod detector;
pub mod error;
pub mod hasher;
pub mod marker;
pub mod reconcile;

pub use compare::{diff_entries, has_divergence, EntryComparison, EntryStatus};
pub use detector::{ChangeDetector, Observation};
pub use error::SyncError;
pub use hasher::hash_file;
pub use reconcile::{apply, ReconcileOutcome};
