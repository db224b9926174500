//! Per-project JDK table files.
//!
//! # Layout
//!
//! ```text
//! <project>/
//!   .idea/
//!     jdk.table.win.xml   (used on Windows when present)
//!     jdk.table.lin.xml   (used on Linux when present)
//!     jdk.table.mac.xml   (used on macOS when present)
//!     jdk.table.xml       (fallback for every OS)
//!     jdk.table.xml.health_check.txt   (liveness marker)
//!     jdk.table.xml.updated.txt        (last reconciliation marker)
//! ```
//!
//! Exactly one file is resolved per call; there is no search beyond that order.

use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};

use crate::error::TableError;
use crate::types::{HostOs, JdkEntry, JdkName, Project};

/// Project-relative directory holding the table files.
pub const SETTINGS_DIR: &str = ".idea";
/// Fallback table file name, read on every OS.
pub const ALL_OS_FILE: &str = "jdk.table.xml";
/// Token replaced with the project base path before parsing.
pub const PROJECT_DIR_TOKEN: &str = "$PROJECT_DIR$";

/// Marker suffix written on every heartbeat tick.
pub const HEALTH_CHECK_SUFFIX: &str = "health_check";
/// Marker suffix written after a successful reconciliation.
pub const UPDATED_SUFFIX: &str = "updated";

// ---------------------------------------------------------------------------
// 1. Resolution
// ---------------------------------------------------------------------------

/// `<base>/.idea/` — pure, no I/O.
pub fn settings_dir(project: &Project) -> PathBuf {
    project.base_path.join(SETTINGS_DIR)
}

fn os_specific_file(os: HostOs) -> Option<&'static str> {
    match os {
        HostOs::Windows => Some("jdk.table.win.xml"),
        HostOs::Linux => Some("jdk.table.lin.xml"),
        HostOs::Mac => Some("jdk.table.mac.xml"),
        HostOs::Other => None,
    }
}

/// Resolve the table file for `project`.
///
/// The OS-specific file wins when it exists on the project's OS; otherwise the
/// all-OS file is returned whether or not it exists.
pub fn table_file(project: &Project) -> PathBuf {
    let dir = settings_dir(project);
    if let Some(name) = os_specific_file(project.os) {
        let candidate = dir.join(name);
        if candidate.exists() {
            return candidate;
        }
    }
    dir.join(ALL_OS_FILE)
}

/// True if the resolved table file exists and is a regular file.
pub fn has_table_file(project: &Project) -> bool {
    table_file(project).is_file()
}

/// `<table file>.<suffix>.txt`, next to the resolved table file.
pub fn marker_path(project: &Project, suffix: &str) -> PathBuf {
    let table = table_file(project);
    let file_name = table
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| ALL_OS_FILE.to_string());
    table.with_file_name(format!("{file_name}.{suffix}.txt"))
}

// ---------------------------------------------------------------------------
// 2. Parsing
// ---------------------------------------------------------------------------

/// Read and parse every JDK entry from the project's resolved table file.
///
/// `$PROJECT_DIR$` is substituted with the project base path first. Entries are
/// returned in document order; duplicates are kept.
pub fn read_entries(project: &Project) -> Result<Vec<JdkEntry>, TableError> {
    let path = table_file(project);
    let raw = std::fs::read_to_string(&path).map_err(|source| TableError::Io {
        path: path.clone(),
        source,
    })?;
    let base = project.base_path.to_string_lossy();
    let text = raw.replace(PROJECT_DIR_TOKEN, &base);
    parse_entries(&path, &text)
}

/// Parse JDK entries from already-substituted XML text.
///
/// Every `jdk` element below the document root counts, at any depth. Its
/// `name`, `homePath`, `type` and `version` children carry a `value` attribute.
pub fn parse_entries(path: &Path, text: &str) -> Result<Vec<JdkEntry>, TableError> {
    let doc = roxmltree::Document::parse(text).map_err(|source| TableError::Xml {
        path: path.to_path_buf(),
        source,
    })?;
    let root = doc.root_element();

    let mut entries = Vec::new();
    for (index, jdk) in root
        .descendants()
        .filter(|node| *node != root && node.has_tag_name("jdk"))
        .enumerate()
    {
        let name = child_value(jdk, "name").ok_or_else(|| TableError::MissingName {
            path: path.to_path_buf(),
            index,
        })?;
        entries.push(JdkEntry {
            name: JdkName::from(name),
            home_path: child_value(jdk, "homePath").unwrap_or_default().to_string(),
            type_tag: child_value(jdk, "type").unwrap_or_default().to_string(),
            version: child_value(jdk, "version").map(str::to_string),
        });
    }
    Ok(entries)
}

fn child_value<'a>(node: roxmltree::Node<'a, '_>, tag: &str) -> Option<&'a str> {
    node.children()
        .find(|child| child.has_tag_name(tag))
        .and_then(|child| child.attribute("value"))
}

// ---------------------------------------------------------------------------
// 3. Markers
// ---------------------------------------------------------------------------

/// Current UTC time as RFC 3339 with milliseconds, e.g. `2024-05-01T10:00:00.123Z`.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
