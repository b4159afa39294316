use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub policy: PolicySettings,
    #[serde(default)]
    pub store: StoreConfig,
}

/// Thresholds and replay cadence used by the policy engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicySettings {
    /// Priority at or above which an update may be forced (default: 4).
    #[serde(default = "default_high_priority_threshold")]
    pub high_priority_threshold: i32,
    /// Priority at or above which the medium replay cadence applies (default: 2).
    #[serde(default = "default_medium_priority_threshold")]
    pub medium_priority_threshold: i32,
    /// Days between prompts for medium-priority updates (default: 1).
    #[serde(default = "default_medium_replay_interval_days")]
    pub medium_replay_interval_days: i32,
    /// Days between prompts for low-priority updates (default: 7).
    #[serde(default = "default_low_replay_interval_days")]
    pub low_replay_interval_days: i32,
}

/// Where the decline record is persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Decline record file. Defaults to the platform data directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

fn default_high_priority_threshold() -> i32 {
    4
}

fn default_medium_priority_threshold() -> i32 {
    2
}

fn default_medium_replay_interval_days() -> i32 {
    1
}

fn default_low_replay_interval_days() -> i32 {
    7
}

impl Default for PolicySettings {
    fn default() -> Self {
        Self {
            high_priority_threshold: default_high_priority_threshold(),
            medium_priority_threshold: default_medium_priority_threshold(),
            medium_replay_interval_days: default_medium_replay_interval_days(),
            low_replay_interval_days: default_low_replay_interval_days(),
        }
    }
}

impl PolicySettings {
    /// Replay interval for an update of the given (effective) priority.
    pub fn replay_interval_days(&self, priority: i32) -> i32 {
        if priority >= self.medium_priority_threshold {
            self.medium_replay_interval_days
        } else {
            self.low_replay_interval_days
        }
    }
}

impl StoreConfig {
    /// Resolved decline record path.
    ///
    /// Uses `~/.local/share/update-gate/declined.toml` on Linux, or the
    /// equivalent via `dirs::data_dir()`. Falls back to the current directory.
    pub fn resolved_path(&self) -> PathBuf {
        if let Some(path) = &self.path {
            return path.clone();
        }
        let data_dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        data_dir.join("update-gate").join("declined.toml")
    }
}
