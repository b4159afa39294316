use chrono::{DateTime, TimeZone, Utc};

/// Whole days elapsed from `from` to `to` as observed on a wall clock in `tz`.
///
/// A day counts only once the local time of day has been reached again, so
/// 23:00 to 01:00 the next morning is zero days. Negative when `to` precedes
/// `from`.
pub fn days_between<Tz: TimeZone>(from: DateTime<Utc>, to: DateTime<Utc>, tz: &Tz) -> i64 {
    let start = from.with_timezone(tz).naive_local();
    let end = to.with_timezone(tz).naive_local();

    let mut days = (end.date() - start.date()).num_days();
    if days > 0 && end.time() < start.time() {
        days -= 1;
    } else if days < 0 && end.time() > start.time() {
        days += 1;
    }
    days
}
