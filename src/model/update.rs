use serde::{Deserialize, Serialize};

/// Highest priority the platform can assign to an update.
///
/// Priorities are reported in `0..=MAX_PRIORITY`; anything outside that
/// range is treated as `0` so a malformed value never escalates an update.
pub const MAX_PRIORITY: i32 = 5;

/// Availability as reported by the update source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    None,
    Available,
    InProgress,
    /// A flow was started outside this session and must be resumed.
    DeveloperTriggeredInProgress,
}

/// Metadata of an available build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateInfo {
    /// Identifier of the available build.
    pub version_code: i64,
    /// Raw priority as reported (higher is more urgent).
    pub priority: i32,
    /// Days since the update became available, if known.
    #[serde(default)]
    pub staleness_days: Option<i32>,
    pub availability: Availability,
    /// The platform allows a forced (blocking) flow for this build.
    pub immediate_allowed: bool,
    /// The platform allows a flexible (background) flow for this build.
    pub flexible_allowed: bool,
}

impl UpdateInfo {
    /// Priority clamped to the valid range. Out-of-range values map to `0`.
    pub fn effective_priority(&self) -> i32 {
        if (0..=MAX_PRIORITY).contains(&self.priority) {
            self.priority
        } else {
            0
        }
    }

    /// Staleness in days, `0` when the platform did not report one.
    pub fn staleness(&self) -> i32 {
        self.staleness_days.unwrap_or(0)
    }
}

/// Download counters of a flow in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InstallProgress {
    pub bytes_downloaded: u64,
    pub total_bytes: u64,
}

impl InstallProgress {
    pub fn new(bytes_downloaded: u64, total_bytes: u64) -> Self {
        Self {
            bytes_downloaded,
            total_bytes,
        }
    }

    /// Downloaded fraction in `0.0..=1.0`, `None` while the total is unknown.
    pub fn fraction(&self) -> Option<f64> {
        if self.total_bytes == 0 {
            return None;
        }
        let ratio = self.bytes_downloaded as f64 / self.total_bytes as f64;
        Some(ratio.clamp(0.0, 1.0))
    }
}

/// Raw status emitted by an update source on every check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RawStatus {
    NotAvailable,
    Available(UpdateInfo),
    InProgress(InstallProgress),
    Downloaded,
}
