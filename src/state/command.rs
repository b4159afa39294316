use serde::Serialize;

use crate::model::{UpdateInfo, UpdateMode};

/// An action a state offers to the UI.
///
/// Commands are plain values bound to the snapshot they were projected
/// from. Executing one is the job of the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum UpdateCommand {
    /// Begin an update flow for `info`.
    Start { info: UpdateInfo, mode: UpdateMode },
    /// Dismiss an optional update.
    Decline { info: UpdateInfo },
    /// Finalize a downloaded update.
    CompleteInstall,
}

impl UpdateCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Start { .. } => "start",
            Self::Decline { .. } => "decline",
            Self::CompleteInstall => "complete_install",
        }
    }
}
