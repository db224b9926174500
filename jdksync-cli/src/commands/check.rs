//! `jdksync check` — one-shot comparison of a project's JDK table and the registry.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use jdksync_core::{table, FileRegistry};
use jdksync_sync::{diff_entries, has_divergence, hash_file, EntryComparison, EntryStatus};

/// Arguments for `jdksync check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Project root (defaults to the current directory).
    pub project: Option<PathBuf>,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct CheckReport {
    project: String,
    table_file: String,
    present: bool,
    digest: Option<String>,
    diverged: bool,
    entries: Vec<EntryComparison>,
}

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "jdk")]
    name: String,
    #[tabled(rename = "status")]
    status: String,
    #[tabled(rename = "declared home")]
    declared: String,
    #[tabled(rename = "registered home")]
    registered: String,
}

impl CheckArgs {
    pub fn run(self) -> Result<()> {
        let home = super::home_dir()?;
        let project = super::resolve_project(self.project)?;
        let registry = FileRegistry::at(&home);

        let table_path = table::table_file(&project);
        let present = table::has_table_file(&project);
        let entries = diff_entries(&project, &registry)
            .with_context(|| format!("failed to compare {}", table_path.display()))?;
        let diverged = has_divergence(&project, &registry)
            .with_context(|| format!("failed to compare {}", table_path.display()))?;

        let report = CheckReport {
            project: project.base_path.display().to_string(),
            table_file: table_path.display().to_string(),
            present,
            digest: hash_file(&table_path),
            diverged,
            entries,
        };

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("failed to serialize check JSON")?
            );
            return Ok(());
        }
        print_report(report);
        Ok(())
    }
}

fn print_report(report: CheckReport) {
    println!("project:    {}", report.project);
    println!("table file: {}", report.table_file);
    if !report.present {
        println!("{}", "no JDK table file; nothing to reconcile".bright_black());
        return;
    }
    if let Some(digest) = &report.digest {
        println!("sha256:     {digest}");
    }

    if report.entries.is_empty() {
        println!("{}", "JDK table declares no entries".bright_black());
    } else {
        let rows: Vec<EntryRow> = report
            .entries
            .iter()
            .map(|c| EntryRow {
                name: c.declared.name.0.clone(),
                status: status_label(&c.status),
                declared: c.declared.home_path.clone(),
                registered: registered_home(&c.status),
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
    }

    if report.diverged {
        println!(
            "{} registry differs; run 'jdksync reconcile' to apply the JDK table",
            "■".yellow().bold()
        );
    } else {
        println!("{} registry matches the JDK table", "■".green().bold());
    }
}

fn status_label(status: &EntryStatus) -> String {
    match status {
        EntryStatus::Matches => "MATCHES".green().to_string(),
        EntryStatus::Missing => "MISSING".yellow().to_string(),
        EntryStatus::PathDiffers { .. } => "PATH DIFFERS".red().to_string(),
        EntryStatus::RegisteredPathInvalid { .. } => "REGISTERED PATH GONE".bright_black().to_string(),
    }
}

fn registered_home(status: &EntryStatus) -> String {
    match status {
        EntryStatus::Matches => "(same)".to_string(),
        EntryStatus::Missing => "-".to_string(),
        EntryStatus::PathDiffers { registered }
        | EntryStatus::RegisteredPathInvalid { registered } => registered.clone(),
    }
}
