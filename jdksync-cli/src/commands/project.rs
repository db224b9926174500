//! `jdksync project list|add|remove`

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use colored::Colorize;

use jdksync_core::{table, Project};
use jdksync_daemon::{paths, WatchConfig};

/// Manage the project list `jdksync watch` uses when given no paths.
#[derive(Subcommand, Debug)]
pub enum ProjectCommand {
    /// List configured projects.
    List,

    /// Add a project root (defaults to the current directory).
    Add {
        path: Option<PathBuf>,
    },

    /// Remove a project root (defaults to the current directory).
    Remove {
        path: Option<PathBuf>,
    },
}

pub fn run(cmd: ProjectCommand) -> Result<()> {
    let home = super::home_dir()?;
    let mut config = WatchConfig::load_at(&home).context("failed to load jdksync config")?;
    match cmd {
        ProjectCommand::List => {
            list(&config);
            Ok(())
        }
        ProjectCommand::Add { path } => {
            let project = super::resolve_project(path)?;
            if !config.add_project(project.base_path.clone()) {
                println!("'{}' is already configured", project.base_path.display());
                return Ok(());
            }
            save(&config, &home)?;
            println!("✓ added project '{}' ({})", project.name, project.base_path.display());
            if !table::has_table_file(&project) {
                println!(
                    "  {}",
                    format!("no JDK table at {} yet", table::table_file(&project).display())
                        .bright_black()
                );
            }
            Ok(())
        }
        ProjectCommand::Remove { path } => {
            let base = removal_target(path)?;
            if !config.remove_project(&base) {
                bail!("'{}' is not a configured project", base.display());
            }
            save(&config, &home)?;
            println!("✓ removed project {}", base.display());
            Ok(())
        }
    }
}

fn list(config: &WatchConfig) {
    if config.projects.is_empty() {
        println!("No projects configured.");
        println!("Run: jdksync project add <path>");
        return;
    }
    for base in &config.projects {
        let project = Project::at(base.clone());
        let state = if table::has_table_file(&project) {
            "table".green()
        } else if base.is_dir() {
            "no table".yellow()
        } else {
            "missing".red()
        };
        println!("  {} ({}) [{}]", project.name, base.display(), state);
    }
}

/// A configured project may have been deleted, so fall back to the literal
/// path when it can no longer be canonicalized.
fn removal_target(path: Option<PathBuf>) -> Result<PathBuf> {
    let path = match path {
        Some(path) => path,
        None => std::env::current_dir().context("could not determine current directory")?,
    };
    Ok(std::fs::canonicalize(&path).unwrap_or(path))
}

fn save(config: &WatchConfig, home: &std::path::Path) -> Result<()> {
    config
        .save_at(home)
        .with_context(|| format!("failed to write {}", paths::config_path(home).display()))
}
