use chrono::{DateTime, Local, TimeZone, Utc};

use crate::config::PolicySettings;
use crate::model::{DeclineRecord, UpdateInfo};

use super::calendar::days_between;

/// Decide whether an optional update should be surfaced now.
///
/// Day arithmetic uses the local time zone of the observer.
pub fn should_prompt(
    declined: &DeclineRecord,
    info: &UpdateInfo,
    settings: &PolicySettings,
    now: DateTime<Utc>,
) -> bool {
    should_prompt_in(declined, info, settings, now, &Local)
}

/// [`should_prompt`] with an explicit time zone.
pub fn should_prompt_in<Tz: TimeZone>(
    declined: &DeclineRecord,
    info: &UpdateInfo,
    settings: &PolicySettings,
    now: DateTime<Utc>,
    tz: &Tz,
) -> bool {
    if !info.flexible_allowed {
        return false;
    }

    let interval = i64::from(settings.replay_interval_days(info.effective_priority()));

    // Also the initial cooldown before the first prompt.
    if i64::from(info.staleness()) < interval {
        return false;
    }

    if declined.version == info.version_code
        && days_between(declined.timestamp, now, tz) < interval
    {
        return false;
    }

    true
}
