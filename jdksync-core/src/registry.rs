//! The live JDK registry.
//!
//! # Storage layout
//!
//! ```text
//! ~/.jdksync/
//!   registry.yaml   (mode 0600, created on first write)
//! ```
//!
//! # API pattern
//!
//! Readers and the single writer go through [`JdkRegistry`]. All mutation
//! happens inside [`JdkRegistry::write`], which holds the registry's lock for
//! the whole edit and publishes the result as one unit.
//!
//! [`FileRegistry`] writers in different processes serialize on an `fs2`
//! exclusive lock over `registry.yaml.lock`. Readers take no lock; the rename
//! in `save` keeps them from seeing a half-written file.
//!
//! Path helpers have two forms:
//! - `fn_at(home: &Path, …)` — explicit home; used in tests with `TempDir`
//! - `fn(…)` — derives home from `dirs::home_dir()`, delegates to `_at`

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::error::RegistryError;
use crate::types::{JdkEntry, JdkName};

/// File name of the persisted registry under `~/.jdksync/`.
pub const REGISTRY_FILE: &str = "registry.yaml";

// ---------------------------------------------------------------------------
// 1. Table
// ---------------------------------------------------------------------------

/// Ordered set of JDK entries keyed by name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JdkTable {
    #[serde(default)]
    pub jdks: Vec<JdkEntry>,
}

impl JdkTable {
    pub fn new(jdks: Vec<JdkEntry>) -> Self {
        Self { jdks }
    }

    pub fn find(&self, name: &JdkName) -> Option<&JdkEntry> {
        self.jdks.iter().find(|jdk| &jdk.name == name)
    }

    /// Remove the entry named `name`, returning it.
    pub fn remove(&mut self, name: &JdkName) -> Option<JdkEntry> {
        let index = self.jdks.iter().position(|jdk| &jdk.name == name)?;
        Some(self.jdks.remove(index))
    }

    /// Append `entry`. Callers remove an existing entry of the same name first.
    pub fn add(&mut self, entry: JdkEntry) {
        self.jdks.push(entry);
    }

    pub fn len(&self) -> usize {
        self.jdks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jdks.is_empty()
    }
}

// ---------------------------------------------------------------------------
// 2. Collaborator trait
// ---------------------------------------------------------------------------

/// Access to the host's live JDK registry.
pub trait JdkRegistry: Send + Sync {
    /// Snapshot of every registered entry, in registry order.
    fn entries(&self) -> Result<Vec<JdkEntry>, RegistryError>;

    /// Look up one entry by name.
    fn find(&self, name: &JdkName) -> Result<Option<JdkEntry>, RegistryError> {
        Ok(self.entries()?.into_iter().find(|jdk| &jdk.name == name))
    }

    /// Run `edit` under exclusive access and publish the edited table.
    fn write(&self, edit: &mut dyn FnMut(&mut JdkTable)) -> Result<(), RegistryError>;
}

// ---------------------------------------------------------------------------
// 3. In-memory registry
// ---------------------------------------------------------------------------

/// Mutex-guarded registry that lives only in memory.
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    table: Mutex<JdkTable>,
}

impl MemoryRegistry {
    pub fn new(jdks: Vec<JdkEntry>) -> Self {
        Self {
            table: Mutex::new(JdkTable::new(jdks)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, JdkTable> {
        self.table.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl JdkRegistry for MemoryRegistry {
    fn entries(&self) -> Result<Vec<JdkEntry>, RegistryError> {
        Ok(self.lock().jdks.clone())
    }

    fn find(&self, name: &JdkName) -> Result<Option<JdkEntry>, RegistryError> {
        Ok(self.lock().find(name).cloned())
    }

    fn write(&self, edit: &mut dyn FnMut(&mut JdkTable)) -> Result<(), RegistryError> {
        let mut table = self.lock();
        edit(&mut *table);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// 4. YAML-backed registry
// ---------------------------------------------------------------------------

/// `<home>/.jdksync/` — pure, no I/O.
pub fn jdksync_dir_at(home: &Path) -> PathBuf {
    home.join(".jdksync")
}

/// `<home>/.jdksync/registry.yaml` — pure, no I/O.
pub fn registry_path_at(home: &Path) -> PathBuf {
    jdksync_dir_at(home).join(REGISTRY_FILE)
}

/// Registry persisted as YAML. Every write is load → edit → atomic save while
/// holding an in-process mutex and the cross-process lock file.
#[derive(Debug)]
pub struct FileRegistry {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileRegistry {
    /// Registry stored at an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Registry at `<home>/.jdksync/registry.yaml`.
    pub fn at(home: &Path) -> Self {
        Self::new(registry_path_at(home))
    }

    /// `at` convenience wrapper.
    pub fn open() -> Result<Self, RegistryError> {
        Ok(Self::at(&home()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `registry.yaml.lock`, the advisory lock file guarding writers.
    pub fn lock_path(&self) -> PathBuf {
        self.path.with_extension("yaml.lock")
    }

    /// Load the table; a missing file is an empty table.
    pub fn load(&self) -> Result<JdkTable, RegistryError> {
        if !self.path.exists() {
            return Ok(JdkTable::default());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(JdkTable::default());
        }
        serde_yaml::from_str(&contents).map_err(|source| RegistryError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Atomically save the table.
    ///
    /// Write flow: serialize → `.yaml.tmp` sibling → `chmod 0600` → `rename`.
    pub fn save(&self, table: &JdkTable) -> Result<(), RegistryError> {
        self.ensure_dir()?;
        let tmp = self.path.with_extension("yaml.tmp");
        let yaml = serde_yaml::to_string(table)?;
        std::fs::write(&tmp, yaml)?;
        set_file_permissions(&tmp)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn ensure_dir(&self) -> Result<(), RegistryError> {
        if let Some(dir) = self.path.parent() {
            if !dir.exists() {
                std::fs::create_dir_all(dir)?;
                set_dir_permissions(dir)?;
            }
        }
        Ok(())
    }
}

impl JdkRegistry for FileRegistry {
    fn entries(&self) -> Result<Vec<JdkEntry>, RegistryError> {
        Ok(self.load()?.jdks)
    }

    fn write(&self, edit: &mut dyn FnMut(&mut JdkTable)) -> Result<(), RegistryError> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        self.ensure_dir()?;
        let lock_file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(self.lock_path())?;
        // Blocks until writers in other processes release it.
        lock_file.lock_exclusive()?;

        let mut table = self.load()?;
        edit(&mut table);
        let saved = self.save(&table);
        let _ = lock_file.unlock();
        saved
    }
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn home() -> Result<PathBuf, RegistryError> {
    dirs::home_dir().ok_or(RegistryError::HomeNotFound)
}

#[cfg(unix)]
fn set_dir_permissions(path: &Path) -> Result<(), RegistryError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o700))?;
    Ok(())
}
#[cfg(not(unix))]
fn set_dir_permissions(_path: &Path) -> Result<(), RegistryError> {
    Ok(())
}

#[cfg(unix)]
fn set_file_permissions(path: &Path) -> Result<(), RegistryError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}
#[cfg(not(unix))]
fn set_file_permissions(_path: &Path) -> Result<(), RegistryError> {
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
