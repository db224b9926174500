//! Daemon configuration at `<home>/.jdksync/config.yaml`.
//!
//! ```yaml
//! poll_interval_ms: 5000
//! heartbeat_every: 120
//! projects:
//!   - /work/petclinic
//! ```
//!
//! Every field is optional; a missing file means all defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{io_err, DaemonError};
use crate::paths::{config_path, DEFAULT_HEARTBEAT_EVERY, DEFAULT_POLL_INTERVAL, MIN_POLL_INTERVAL};
use crate::scheduler::PollSettings;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    pub poll_interval_ms: u64,
    pub heartbeat_every: u32,
    pub projects: Vec<PathBuf>,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL.as_millis() as u64,
            heartbeat_every: DEFAULT_HEARTBEAT_EVERY,
            projects: Vec::new(),
        }
    }
}

impl WatchConfig {
    /// Load and validate the config under `home`.
    pub fn load_at(home: &Path) -> Result<Self, DaemonError> {
        let path = config_path(home);
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        let config: Self = if contents.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(&contents)
                .map_err(|source| DaemonError::Config { path, source })?
        };
        config.validate()?;
        Ok(config)
    }

    /// Save atomically (`.yaml.tmp` + rename).
    pub fn save_at(&self, home: &Path) -> Result<(), DaemonError> {
        self.validate()?;
        let path = config_path(home);
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let tmp = path.with_extension("yaml.tmp");
        std::fs::write(&tmp, yaml).map_err(|e| io_err(&tmp, e))?;
        std::fs::rename(&tmp, &path).map_err(|e| io_err(&path, e))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), DaemonError> {
        if self.poll_interval() < MIN_POLL_INTERVAL {
            return Err(DaemonError::InvalidConfig(format!(
                "poll_interval_ms must be at least {}, got {}",
                MIN_POLL_INTERVAL.as_millis(),
                self.poll_interval_ms
            )));
        }
        if self.heartbeat_every == 0 {
            return Err(DaemonError::InvalidConfig(
                "heartbeat_every must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn settings(&self) -> PollSettings {
        PollSettings {
            poll_interval: self.poll_interval(),
            heartbeat_every: self.heartbeat_every,
        }
    }

    /// Add `project` unless already listed. Returns whether it was added.
    pub fn add_project(&mut self, project: PathBuf) -> bool {
        if self.projects.contains(&project) {
            return false;
        }
        self.projects.push(project);
        true
    }

    /// Remove `project`. Returns whether it was listed.
    pub fn remove_project(&mut self, project: &Path) -> bool {
        let before = self.projects.len();
        self.projects.retain(|p| p != project);
        self.projects.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let home = TempDir::new().expect("home");
        let config = WatchConfig::load_at(home.path()).expect("load");
        assert_eq!(config, WatchConfig::default());
        assert_eq!(config.poll_interval(), Duration::from_secs(5));
        assert_eq!(config.heartbeat_every, 120);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let home = TempDir::new().expect("home");
        let path = config_path(home.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "projects:\n  - /work/petclinic\n").unwrap();

        let config = WatchConfig::load_at(home.path()).expect("load");
        assert_eq!(config.projects, vec![PathBuf::from("/work/petclinic")]);
        assert_eq!(config.heartbeat_every, DEFAULT_HEARTBEAT_EVERY);
    }

    #[test]
    fn zero_heartbeat_is_rejected() {
        let home = TempDir::new().expect("home");
        let path = config_path(home.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "heartbeat_every: 0\n").unwrap();

        let err = WatchConfig::load_at(home.path()).unwrap_err();
        assert!(matches!(err, DaemonError::InvalidConfig(_)), "got: {err}");
    }

    #[test]
    fn tiny_interval_is_rejected() {
        let config = WatchConfig {
            poll_interval_ms: 10,
            ..WatchConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_yaml_names_the_file() {
        let home = TempDir::new().expect("home");
        let path = config_path(home.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "projects: [unclosed").unwrap();

        let err = WatchConfig::load_at(home.path()).unwrap_err();
        assert!(err.to_string().contains("config.yaml"), "got: {err}");
    }

    #[test]
    fn save_then_load_keeps_project_list() {
        let home = TempDir::new().expect("home");
        let mut config = WatchConfig::default();
        assert!(config.add_project(PathBuf::from("/work/a")));
        assert!(!config.add_project(PathBuf::from("/work/a")));
        assert!(config.add_project(PathBuf::from("/work/b")));
        assert!(config.remove_project(Path::new("/work/a")));
        config.save_at(home.path()).expect("save");

        let loaded = WatchConfig::load_at(home.path()).expect("load");
        assert_eq!(loaded.projects, vec![PathBuf::from("/work/b")]);
        assert!(!config_path(home.path()).with_extension("yaml.tmp").exists());
    }
}
