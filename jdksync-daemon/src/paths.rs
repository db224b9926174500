use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE: &str = "config.yaml";

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
/// Poll wake-ups between liveness markers (10 minutes at the default interval).
pub const DEFAULT_HEARTBEAT_EVERY: u32 = 120;
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(100);

pub fn jdksync_root(home: &Path) -> PathBuf {
    jdksync_core::registry::jdksync_dir_at(home)
}

pub fn config_path(home: &Path) -> PathBuf {
    jdksync_root(home).join(CONFIG_FILE)
}

pub fn registry_path(home: &Path) -> PathBuf {
    jdksync_core::registry::registry_path_at(home)
}
