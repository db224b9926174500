//! `jdksync registry list|add|remove`

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use jdksync_core::{FileRegistry, JdkEntry, JdkName, JdkRegistry};

/// Inspect or edit the JDK registry at `~/.jdksync/registry.yaml`.
#[derive(Subcommand, Debug)]
pub enum RegistryCommand {
    /// List registered JDKs.
    List {
        /// Emit machine-readable JSON.
        #[arg(long)]
        json: bool,
    },

    /// Register a JDK, replacing any entry with the same name.
    Add(AddArgs),

    /// Unregister a JDK by name.
    Remove {
        /// JDK name.
        name: String,
    },
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// JDK name (e.g. "corretto-17").
    pub name: String,

    /// JDK install directory.
    pub home: String,

    /// SDK type tag.
    #[arg(long = "type", short = 't', value_name = "TYPE", default_value = "JavaSDK")]
    pub type_tag: String,

    /// Version string reported by the JDK.
    #[arg(long)]
    pub version: Option<String>,
}

#[derive(Tabled)]
struct JdkRow {
    #[tabled(rename = "name")]
    name: String,
    #[tabled(rename = "type")]
    type_tag: String,
    #[tabled(rename = "version")]
    version: String,
    #[tabled(rename = "home")]
    home: String,
}

pub fn run(cmd: RegistryCommand) -> Result<()> {
    let registry = FileRegistry::at(&super::home_dir()?);
    match cmd {
        RegistryCommand::List { json } => list(&registry, json),
        RegistryCommand::Add(args) => add(&registry, args),
        RegistryCommand::Remove { name } => remove(&registry, name),
    }
}

fn list(registry: &FileRegistry, json: bool) -> Result<()> {
    let jdks = registry
        .entries()
        .with_context(|| format!("failed to read {}", registry.path().display()))?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&jdks).context("failed to serialize registry JSON")?
        );
        return Ok(());
    }
    if jdks.is_empty() {
        println!("No JDKs registered.");
        println!("Run: jdksync registry add <name> <home>");
        return Ok(());
    }

    let rows: Vec<JdkRow> = jdks
        .into_iter()
        .map(|jdk| {
            let home = if jdk.has_valid_home() {
                jdk.home_path
            } else {
                format!("{} {}", jdk.home_path, "(missing)".bright_black())
            };
            JdkRow {
                name: jdk.name.0,
                type_tag: jdk.type_tag,
                version: jdk.version.unwrap_or_else(|| "-".to_string()),
                home,
            }
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
    Ok(())
}

fn add(registry: &FileRegistry, args: AddArgs) -> Result<()> {
    let mut entry = JdkEntry::new(args.name, args.home, args.type_tag);
    entry.version = args.version;
    let name = entry.name.clone();

    let mut replaced = false;
    let mut pending = Some(entry);
    registry
        .write(&mut |table| {
            replaced = table.remove(&name).is_some();
            if let Some(entry) = pending.take() {
                table.add(entry);
            }
        })
        .with_context(|| format!("failed to update {}", registry.path().display()))?;

    if replaced {
        println!("✓ replaced JDK '{name}'");
    } else {
        println!("✓ registered JDK '{name}'");
    }
    Ok(())
}

fn remove(registry: &FileRegistry, name: String) -> Result<()> {
    let name = JdkName::from(name);
    let mut removed = false;
    registry
        .write(&mut |table| removed = table.remove(&name).is_some())
        .with_context(|| format!("failed to update {}", registry.path().display()))?;

    if !removed {
        bail!("JDK '{name}' is not registered");
    }
    println!("✓ removed JDK '{name}'");
    Ok(())
}
