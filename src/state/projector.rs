use chrono::{DateTime, Utc};

use crate::config::PolicySettings;
use crate::model::{DeclineRecord, RawStatus, UpdateMode};
use crate::policy::{classify_availability, should_prompt, Classification};

use super::command::UpdateCommand;
use super::update_state::UpdateState;

/// Project the latest raw status and decline record into an [`UpdateState`].
///
/// Pure: identical inputs always give an equal state.
pub fn project(
    raw: &RawStatus,
    declined: &DeclineRecord,
    settings: &PolicySettings,
    now: DateTime<Utc>,
) -> UpdateState {
    match raw {
        RawStatus::NotAvailable => UpdateState::NotAvailable,
        RawStatus::Available(info) => match classify_availability(info, settings) {
            Classification::Required => UpdateState::RequiredUpdate {
                trigger: UpdateCommand::Start {
                    info: info.clone(),
                    mode: UpdateMode::Immediate,
                },
            },
            Classification::Optional => UpdateState::OptionalUpdate {
                trigger: UpdateCommand::Start {
                    info: info.clone(),
                    mode: UpdateMode::Flexible,
                },
                decline: UpdateCommand::Decline { info: info.clone() },
                should_prompt: should_prompt(declined, info, settings, now),
            },
        },
        RawStatus::InProgress(progress) => UpdateState::InProgressUpdate {
            bytes_downloaded: progress.bytes_downloaded,
            total_bytes: progress.total_bytes,
        },
        RawStatus::Downloaded => UpdateState::DownloadedUpdate {
            complete: UpdateCommand::CompleteInstall,
        },
    }
}
