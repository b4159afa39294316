use serde::{Deserialize, Serialize};

/// How an update flow is presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateMode {
    /// Blocks normal use of the application until complete.
    Immediate,
    /// Downloads in the background; installed at user discretion.
    Flexible,
}

impl UpdateMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Immediate => "IMMEDIATE",
            Self::Flexible => "FLEXIBLE",
        }
    }
}

impl std::fmt::Display for UpdateMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal result of an update flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowResult {
    Accepted,
    /// The user dismissed the flow.
    Cancelled,
    /// The flow itself errored; not a user decision.
    Failed,
    /// Any other result code reported by the host.
    Unrecognized(i32),
}

impl FlowResult {
    pub const CODE_ACCEPTED: i32 = -1;
    pub const CODE_CANCELLED: i32 = 0;
    pub const CODE_FAILED: i32 = 1;

    /// Map a platform result code.
    pub fn from_code(code: i32) -> Self {
        match code {
            Self::CODE_ACCEPTED => Self::Accepted,
            Self::CODE_CANCELLED => Self::Cancelled,
            Self::CODE_FAILED => Self::Failed,
            other => Self::Unrecognized(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_code_maps_platform_codes() {
        assert_eq!(FlowResult::from_code(-1), FlowResult::Accepted);
        assert_eq!(FlowResult::from_code(0), FlowResult::Cancelled);
        assert_eq!(FlowResult::from_code(1), FlowResult::Failed);
        assert_eq!(FlowResult::from_code(99), FlowResult::Unrecognized(99));
    }
}
