//! jdksync core library — domain types, JDK table files, registry persistence.
//!
//! - [`types`] — newtypes, [`JdkEntry`], [`Project`], [`HostOs`]
//! - [`table`] — per-project `jdk.table*.xml` resolution and parsing
//! - [`registry`] — the live JDK registry collaborator and its implementations
//! - [`error`] — [`RegistryError`], [`TableError`]

pub mod error;
pub mod registry;
pub mod table;
pub mod types;

pub use error::{RegistryError, TableError};
pub use registry::{FileRegistry, JdkRegistry, JdkTable, MemoryRegistry};
pub use types::{HostOs, JdkEntry, JdkName, Project, ProjectName};
