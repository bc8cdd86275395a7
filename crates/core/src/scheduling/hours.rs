use chrono::{DateTime, Datelike, NaiveDate, Weekday};
use chrono_tz::Tz;

use crate::scheduling::window::DayPart;
use crate::scheduling::zoned_hour;

pub const MORNING_BLOCK: (u32, u32) = (9, 12);
pub const AFTERNOON_BLOCK: (u32, u32) = (14, 18);

/// Working blocks for `date`, optionally narrowed to one day-part.
///
/// The demo calendar is uniform across agents: Monday through Friday,
/// 09:00-12:00 and 14:00-18:00 in the reference zone, closed on weekends.
pub fn working_blocks(
    date: NaiveDate,
    daypart: Option<DayPart>,
    tz: Tz,
) -> Vec<(DateTime<Tz>, DateTime<Tz>)> {
    if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
        return Vec::new();
    }

    let morning = (zoned_hour(tz, date, MORNING_BLOCK.0), zoned_hour(tz, date, MORNING_BLOCK.1));
    let afternoon =
        (zoned_hour(tz, date, AFTERNOON_BLOCK.0), zoned_hour(tz, date, AFTERNOON_BLOCK.1));

    match daypart {
        Some(DayPart::Morning) => vec![morning],
        Some(DayPart::Afternoon) => vec![afternoon],
        None => vec![morning, afternoon],
    }
}
