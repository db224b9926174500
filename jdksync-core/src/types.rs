//! Domain types for jdksync.
//!
//! All path fields that name project locations use `PathBuf`. JDK home paths
//! stay `String` because they are compared textually against the values the
//! table file declares.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed JDK name; the key of both the table file and the registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JdkName(pub String);

impl fmt::Display for JdkName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for JdkName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for JdkName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A strongly-typed project name (the directory name of the project root).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectName(pub String);

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ProjectName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProjectName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Host operating system family, used to pick an OS-specific table file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostOs {
    Windows,
    Linux,
    Mac,
    Other,
}

impl HostOs {
    /// The OS this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            HostOs::Windows
        } else if cfg!(target_os = "linux") {
            HostOs::Linux
        } else if cfg!(target_os = "macos") {
            HostOs::Mac
        } else {
            HostOs::Other
        }
    }
}

impl fmt::Display for HostOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostOs::Windows => write!(f, "windows"),
            HostOs::Linux => write!(f, "linux"),
            HostOs::Mac => write!(f, "mac"),
            HostOs::Other => write!(f, "other"),
        }
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// A named JDK installation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JdkEntry {
    pub name: JdkName,
    /// Install directory as declared; may be empty when the source omitted it.
    pub home_path: String,
    /// SDK type tag (e.g. `JavaSDK`).
    #[serde(default)]
    pub type_tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl JdkEntry {
    pub fn new(
        name: impl Into<JdkName>,
        home_path: impl Into<String>,
        type_tag: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            home_path: home_path.into(),
            type_tag: type_tag.into(),
            version: None,
        }
    }

    /// True if the home path is set and exists on disk.
    pub fn has_valid_home(&self) -> bool {
        !self.home_path.is_empty() && Path::new(&self.home_path).exists()
    }
}

/// A host project whose `.idea` directory may carry a JDK table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: ProjectName,
    /// Absolute path to the project root; also the per-project loop key.
    pub base_path: PathBuf,
    pub os: HostOs,
}

impl Project {
    /// Build a project for the current host OS, named after the root directory.
    pub fn at(base_path: impl Into<PathBuf>) -> Self {
        Self::with_os(base_path, HostOs::current())
    }

    pub fn with_os(base_path: impl Into<PathBuf>, os: HostOs) -> Self {
        let base_path = base_path.into();
        let name = ProjectName::from(
            base_path
                .file_name()
                .unwrap_or_else(|| base_path.as_os_str())
                .to_string_lossy()
                .into_owned(),
        );
        Self {
            name,
            base_path,
            os,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
