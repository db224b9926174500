//! jdksync — keep the JDK registry in line with per-project JDK tables.
//!
//! # Usage
//!
//! ```text
//! jdksync watch [PROJECT...] [--interval-ms N] [--heartbeat-every N]
//! jdksync check [PROJECT] [--json]
//! jdksync reconcile [PROJECT] [--force]
//! jdksync registry list|add|remove
//! jdksync project list|add|remove
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    check::CheckArgs, project::ProjectCommand, reconcile::ReconcileArgs,
    registry::RegistryCommand, watch::WatchArgs,
};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "jdksync",
    version,
    about = "Reconcile the JDK registry with per-project JDK table files",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Poll project JDK tables and reconcile the registry until Ctrl-C.
    Watch(WatchArgs),

    /// Compare a project's JDK table with the registry once.
    Check(CheckArgs),

    /// Write a project's JDK table into the registry once.
    Reconcile(ReconcileArgs),

    /// Inspect or edit the JDK registry.
    Registry {
        #[command(subcommand)]
        command: RegistryCommand,
    },

    /// Manage the projects `watch` polls by default.
    Project {
        #[command(subcommand)]
        command: ProjectCommand,
    },
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Watch(args) => args.run(),
        Commands::Check(args) => args.run(),
        Commands::Reconcile(args) => args.run(),
        Commands::Registry { command } => commands::registry::run(command),
        Commands::Project { command } => commands::project::run(command),
    }
}
