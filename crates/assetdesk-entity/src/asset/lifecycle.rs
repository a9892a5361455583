//! Date arithmetic for asset lifecycles.

use chrono::{DateTime, Months, TimeDelta, Utc};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Whole days covered by `delta`, rounded towards positive infinity at
/// millisecond resolution. A deadline 29 days and one hour away counts as
/// 30 days; one already passed by half a day counts as 0.
pub fn ceil_days(delta: TimeDelta) -> i64 {
    let millis = delta.num_milliseconds();
    -(-millis).div_euclid(MILLIS_PER_DAY)
}

/// Days from `now` until `deadline`, see [`ceil_days`].
pub fn days_until(deadline: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    ceil_days(deadline - now)
}

/// Add calendar months, clamping the day to the end of a shorter month
/// (Jan 31 + 1 month = Feb 28/29).
pub fn add_months(start: DateTime<Utc>, months: u32) -> Option<DateTime<Utc>> {
    start.checked_add_months(Months::new(months))
}
