use chrono::{DateTime, Duration};
use chrono_tz::Tz;

use crate::scheduling::occupancy::OccupancyInterval;
use crate::scheduling::slots::{generate_day_slots, TimeSlot};
use crate::scheduling::window::parse_window;

/// Enumerate slots for `agent_id` across a natural-language window.
///
/// Walks every calendar day in the resolved `[start, end)` range, tiles
/// slots per day, drops slots already over at `now`, and sorts by start
/// with available slots ahead of conflicted ones at equal starts.
///
/// `booked` is folded into the busy set, so a committed booking shows as
/// unavailable on the read path too, not only at creation time.
pub fn check_availability(
    agent_id: &str,
    window: &str,
    now: DateTime<Tz>,
    booked: &[OccupancyInterval],
    fallback_days: u32,
) -> Vec<TimeSlot> {
    let tz = now.timezone();
    let resolved = parse_window(window, now, fallback_days);

    let mut slots = Vec::new();
    let mut day = resolved.start.with_timezone(&tz).date_naive();
    let end_exclusive = resolved.end;
    loop {
        let day_start = crate::scheduling::zoned_hour(tz, day, 0);
        if day_start >= end_exclusive {
            break;
        }
        slots.extend(generate_day_slots(agent_id, day, resolved.daypart, tz, booked));
        day += Duration::days(1);
    }

    slots.retain(|slot| slot.end > now);
    slots.sort_by(|a, b| a.start.cmp(&b.start).then(b.is_available.cmp(&a.is_available)));
    slots
}
