//! `jdksync reconcile` — apply a project's JDK table to the registry once.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use jdksync_core::{table, FileRegistry};
use jdksync_sync::{apply, has_divergence, marker};

/// Arguments for `jdksync reconcile`.
#[derive(Args, Debug)]
pub struct ReconcileArgs {
    /// Project root (defaults to the current directory).
    pub project: Option<PathBuf>,

    /// Apply even when the registry already matches.
    #[arg(long)]
    pub force: bool,
}

impl ReconcileArgs {
    pub fn run(self) -> Result<()> {
        let home = super::home_dir()?;
        let project = super::resolve_project(self.project)?;
        let registry = FileRegistry::at(&home);

        if !table::has_table_file(&project) {
            bail!(
                "no JDK table file at {}",
                table::table_file(&project).display()
            );
        }
        if !self.force
            && !has_divergence(&project, &registry).context("failed to compare JDK table")?
        {
            println!("✓ registry already matches the JDK table; nothing to do");
            return Ok(());
        }

        let outcome = apply(&project, &registry).context("failed to reconcile JDK table")?;
        marker::stamp(&project, table::UPDATED_SUFFIX)
            .context("failed to write updated marker")?;

        println!(
            "✓ reconciled '{}' ({} replaced, {} added)",
            project.name,
            outcome.replaced.len(),
            outcome.added.len()
        );
        for name in &outcome.replaced {
            println!("  ✎  {name}");
        }
        for name in &outcome.added {
            println!("  +  {name}");
        }
        Ok(())
    }
}
