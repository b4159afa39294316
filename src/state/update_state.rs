use serde::Serialize;

use super::command::UpdateCommand;

/// Classification of the current update situation. Exactly one at a time.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum UpdateState {
    /// Nothing evaluated yet.
    #[default]
    Loading,
    NotAvailable,
    /// The update must be forced. There is no decline edge.
    RequiredUpdate { trigger: UpdateCommand },
    OptionalUpdate {
        trigger: UpdateCommand,
        decline: UpdateCommand,
        /// Whether the UI should actively surface the update now.
        should_prompt: bool,
    },
    InProgressUpdate {
        bytes_downloaded: u64,
        total_bytes: u64,
    },
    DownloadedUpdate { complete: UpdateCommand },
}

impl UpdateState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// True when nothing is pending, i.e. application content may render
    /// behind a "require latest version" gate.
    pub fn allows_content(&self) -> bool {
        matches!(self, Self::NotAvailable)
    }

    /// The primary command of this state, if it offers one.
    pub fn command(&self) -> Option<&UpdateCommand> {
        match self {
            Self::RequiredUpdate { trigger } | Self::OptionalUpdate { trigger, .. } => {
                Some(trigger)
            }
            Self::DownloadedUpdate { complete } => Some(complete),
            Self::Loading | Self::NotAvailable | Self::InProgressUpdate { .. } => None,
        }
    }

    /// Stable lowercase name, used in logs and CLI output.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::NotAvailable => "not_available",
            Self::RequiredUpdate { .. } => "required_update",
            Self::OptionalUpdate { .. } => "optional_update",
            Self::InProgressUpdate { .. } => "in_progress_update",
            Self::DownloadedUpdate { .. } => "downloaded_update",
        }
    }
}
