use crate::config::PolicySettings;
use crate::model::{Availability, UpdateInfo};

/// How an available update must be offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// The update is forced through an immediate flow.
    Required,
    /// The update is offered and may be dismissed.
    Optional,
}

/// Classify an available update.
///
/// Required when a flow was already started outside this session, or when
/// an immediate flow is allowed and the priority reaches the high threshold.
/// Malformed priorities never escalate.
pub fn classify_availability(info: &UpdateInfo, settings: &PolicySettings) -> Classification {
    if info.availability == Availability::DeveloperTriggeredInProgress {
        return Classification::Required;
    }

    if info.immediate_allowed && info.effective_priority() >= settings.high_priority_threshold {
        Classification::Required
    } else {
        Classification::Optional
    }
}
