//! Divergence between a project's JDK table and the live registry.
//!
//! [`has_divergence`] is the gate used by the poll loop: an any-of predicate
//! that stops at the first disagreeing entry. [`diff_entries`] walks every
//! entry and is used for reporting only.

use serde::Serialize;

use jdksync_core::{table, JdkEntry, JdkRegistry, Project};

use crate::SyncError;

/// Whether the registry disagrees with the project's table file.
///
/// Returns `false` when the table file is missing, is not a regular file, or
/// declares no entries. For each declared entry, in file order:
/// - not registered → `true`
/// - registered with a valid home that differs from the file's → `true`
/// - otherwise (same home, or registered home no longer on disk) → next entry
pub fn has_divergence(project: &Project, registry: &dyn JdkRegistry) -> Result<bool, SyncError> {
    if !table::has_table_file(project) {
        return Ok(false);
    }
    let declared = table::read_entries(project)?;
    if declared.is_empty() {
        return Ok(false);
    }
    for entry in &declared {
        let Some(registered) = registry.find(&entry.name)? else {
            tracing::debug!("'{}' is not registered", entry.name);
            return Ok(true);
        };
        if registered.has_valid_home() && registered.home_path != entry.home_path {
            tracing::debug!(
                "'{}' registered at {} but declared at {}",
                entry.name,
                registered.home_path,
                entry.home_path
            );
            return Ok(true);
        }
    }
    Ok(false)
}

/// Per-entry comparison result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EntryStatus {
    /// Registered with the declared home.
    Matches,
    /// Not present in the registry.
    Missing,
    /// Registered with a different, existing home.
    PathDiffers { registered: String },
    /// Registered with a different home that no longer exists; not counted.
    RegisteredPathInvalid { registered: String },
}

impl EntryStatus {
    pub fn is_divergent(&self) -> bool {
        matches!(self, EntryStatus::Missing | EntryStatus::PathDiffers { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryComparison {
    pub declared: JdkEntry,
    #[serde(flatten)]
    pub status: EntryStatus,
}

/// Compare every declared entry against the registry.
///
/// Returns an empty list when the table file is absent.
pub fn diff_entries(
    project: &Project,
    registry: &dyn JdkRegistry,
) -> Result<Vec<EntryComparison>, SyncError> {
    if !table::has_table_file(project) {
        return Ok(Vec::new());
    }
    let mut report = Vec::new();
    for declared in table::read_entries(project)? {
        let status = match registry.find(&declared.name)? {
            None => EntryStatus::Missing,
            Some(registered) if registered.home_path == declared.home_path => EntryStatus::Matches,
            Some(registered) if registered.has_valid_home() => EntryStatus::PathDiffers {
                registered: registered.home_path,
            },
            Some(registered) => EntryStatus::RegisteredPathInvalid {
                registered: registered.home_path,
            },
        };
        report.push(EntryComparison { declared, status });
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use jdksync_core::{
        registry::JdkTable, types::HostOs, JdkName, MemoryRegistry, RegistryError,
    };
    use tempfile::TempDir;

    use super::*;

    /// Registry double that counts lookups.
    struct CountingRegistry {
        inner: MemoryRegistry,
        lookups: AtomicUsize,
    }

    impl CountingRegistry {
        fn new(jdks: Vec<JdkEntry>) -> Self {
            Self {
                inner: MemoryRegistry::new(jdks),
                lookups: AtomicUsize::new(0),
            }
        }
    }

    impl JdkRegistry for CountingRegistry {
        fn entries(&self) -> Result<Vec<JdkEntry>, RegistryError> {
            self.inner.entries()
        }

        fn find(&self, name: &JdkName) -> Result<Option<JdkEntry>, RegistryError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.inner.find(name)
        }

        fn write(&self, edit: &mut dyn FnMut(&mut JdkTable)) -> Result<(), RegistryError> {
            self.inner.write(edit)
        }
    }

    fn project_with_table(xml: &str) -> (TempDir, Project) {
        let dir = TempDir::new().expect("tempdir");
        let idea = dir.path().join(".idea");
        std::fs::create_dir_all(&idea).expect("mkdir");
        std::fs::write(idea.join("jdk.table.xml"), xml).expect("write");
        let project = Project::with_os(dir.path(), HostOs::Other);
        (dir, project)
    }

    fn table_xml(entries: &[(&str, &str)]) -> String {
        let mut xml = String::from("<application><component name=\"ProjectJdkTable\">");
        for (name, home) in entries {
            xml.push_str(&format!(
                "<jdk version=\"2\"><name value=\"{name}\"/><type value=\"JavaSDK\"/><homePath value=\"{home}\"/></jdk>"
            ));
        }
        xml.push_str("</component></application>");
        xml
    }

    #[test]
    fn no_table_file_is_never_divergent() {
        let dir = TempDir::new().expect("tempdir");
        let project = Project::with_os(dir.path(), HostOs::Other);
        let registry = MemoryRegistry::default();
        assert!(!has_divergence(&project, &registry).expect("compare"));
    }

    #[test]
    fn zero_entries_is_never_divergent() {
        let (_dir, project) = project_with_table(&table_xml(&[]));
        // Registry content is irrelevant when the file declares nothing.
        let registry = MemoryRegistry::new(vec![JdkEntry::new("17", "/anything", "JavaSDK")]);
        assert!(!has_divergence(&project, &registry).expect("compare"));
    }

    #[test]
    fn missing_entry_short_circuits() {
        let (_dir, project) = project_with_table(&table_xml(&[
            ("17", "/opt/17"),
            ("21", "/opt/21"),
            ("22", "/opt/22"),
        ]));
        let registry = CountingRegistry::new(vec![]);
        assert!(has_divergence(&project, &registry).expect("compare"));
        assert_eq!(registry.lookups.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn all_present_checks_every_entry() {
        let (_dir, project) = project_with_table(&table_xml(&[("17", "/opt/17"), ("21", "/opt/21")]));
        let registry = CountingRegistry::new(vec![
            JdkEntry::new("17", "/opt/17", "JavaSDK"),
            JdkEntry::new("21", "/opt/21", "JavaSDK"),
        ]);
        assert!(!has_divergence(&project, &registry).expect("compare"));
        assert_eq!(registry.lookups.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn valid_registered_home_that_differs_is_divergent() {
        let real = TempDir::new().expect("real jdk dir");
        let (_dir, project) = project_with_table(&table_xml(&[("17", "/opt/declared-17")]));
        let registry = MemoryRegistry::new(vec![JdkEntry::new(
            "17",
            real.path().to_string_lossy(),
            "JavaSDK",
        )]);
        assert!(has_divergence(&project, &registry).expect("compare"));
    }

    #[test]
    fn invalid_registered_home_is_assumed_in_sync() {
        let (_dir, project) = project_with_table(&table_xml(&[("17", "/opt/declared-17")]));
        let registry =
            MemoryRegistry::new(vec![JdkEntry::new("17", "/gone/jdk-17", "JavaSDK")]);
        assert!(!has_divergence(&project, &registry).expect("compare"));
    }

    #[test]
    fn malformed_table_propagates() {
        let (_dir, project) = project_with_table("<application><jdk>");
        let registry = MemoryRegistry::default();
        let err = has_divergence(&project, &registry).unwrap_err();
        assert!(matches!(err, SyncError::Table(_)), "got: {err}");
    }

    #[test]
    fn diff_reports_every_entry() {
        let real = TempDir::new().expect("real jdk dir");
        let real_home = real.path().to_string_lossy().into_owned();
        let (_dir, project) = project_with_table(&table_xml(&[
            ("same", "/opt/same"),
            ("missing", "/opt/missing"),
            ("moved", "/opt/moved"),
            ("stale", "/opt/stale"),
        ]));
        let registry = MemoryRegistry::new(vec![
            JdkEntry::new("same", "/opt/same", "JavaSDK"),
            JdkEntry::new("moved", real_home.clone(), "JavaSDK"),
            JdkEntry::new("stale", "/gone/stale", "JavaSDK"),
        ]);

        let report = diff_entries(&project, &registry).expect("diff");
        let statuses: Vec<_> = report.iter().map(|c| c.status.clone()).collect();
        assert_eq!(
            statuses,
            vec![
                EntryStatus::Matches,
                EntryStatus::Missing,
                EntryStatus::PathDiffers {
                    registered: real_home
                },
                EntryStatus::RegisteredPathInvalid {
                    registered: "/gone/stale".to_string()
                },
            ]
        );
        assert_eq!(report.iter().filter(|c| c.status.is_divergent()).count(), 2);
    }
}
