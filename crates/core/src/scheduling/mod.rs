//! Availability and booking for agent visit appointments.
//!
//! The pipeline is deliberately layered: `window` resolves a natural-language
//! search window, `hours` bounds candidate slots to working blocks,
//! `occupancy` simulates a calendar deterministically, `slots` tiles
//! 45-minute candidates, `availability` assembles the multi-day view, and
//! `booking` owns the committed-event registry and its conflict checks.

pub mod availability;
pub mod booking;
pub mod hours;
pub mod occupancy;
pub mod slots;
pub mod window;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;

/// Resolve a wall-clock hour on `date` in `tz`.
///
/// Falls back to the UTC interpretation for local times skipped by a DST
/// transition; none of the calendar hours used here fall in that range for
/// European zones, but the conversion must not panic on exotic configs.
pub(crate) fn zoned_hour(tz: Tz, date: NaiveDate, hour: u32) -> DateTime<Tz> {
    let time = NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN);
    let naive = NaiveDateTime::new(date, time);
    match tz.from_local_datetime(&naive).earliest() {
        Some(instant) => instant,
        None => tz.from_utc_datetime(&naive),
    }
}
