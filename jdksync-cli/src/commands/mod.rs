pub mod check;
pub mod project;
pub mod reconcile;
pub mod registry;
pub mod watch;

use std::path::PathBuf;

use anyhow::{Context, Result};
use jdksync_core::Project;

pub(crate) fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().context("could not determine home directory")
}

/// Resolve a project root argument, defaulting to the current directory.
pub(crate) fn resolve_project(path: Option<PathBuf>) -> Result<Project> {
    let path = match path {
        Some(path) => path,
        None => std::env::current_dir().context("could not determine current directory")?,
    };
    let base = std::fs::canonicalize(&path)
        .with_context(|| format!("project directory not found: {}", path.display()))?;
    Ok(Project::at(base))
}
