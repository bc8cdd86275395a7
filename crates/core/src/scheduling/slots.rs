use chrono::{DateTime, Duration, NaiveDate};
use chrono_tz::Tz;
use serde::Serialize;

use crate::scheduling::hours::working_blocks;
use crate::scheduling::occupancy::{synthetic_busy, OccupancyInterval};
use crate::scheduling::window::DayPart;

/// Fixed duration of generated appointment slots.
pub const SLOT_MINUTES: i64 = 45;
/// Step between consecutive candidate slot starts within a block.
const STEP_MINUTES: i64 = 60;

pub const SLOT_SOURCE: &str = "calendar:mock";
const CONFIDENCE_FREE: f64 = 0.82;
const CONFIDENCE_BUSY: f64 = 0.70;

/// A candidate appointment window, produced fresh on every query and never
/// persisted.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TimeSlot {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub duration_min: i64,
    pub agent_id: String,
    pub timezone: String,
    pub is_available: bool,
    pub source: &'static str,
    pub confidence: f64,
    pub reason: Option<String>,
}

/// Enumerate candidate slots for one agent and one calendar day.
///
/// Within each working block, slots start on the hour from the block start
/// while `start + 45min <= block_end` (a 09:00-12:00 block yields 09:00,
/// 10:00 and 11:00). A slot is available iff it overlaps neither the
/// synthetic occupancy for that day nor any interval in `extra_busy`.
pub fn generate_day_slots(
    agent_id: &str,
    date: NaiveDate,
    daypart: Option<DayPart>,
    tz: Tz,
    extra_busy: &[OccupancyInterval],
) -> Vec<TimeSlot> {
    let busy = synthetic_busy(agent_id, date, tz);
    let mut slots = Vec::new();

    for (block_start, block_end) in working_blocks(date, daypart, tz) {
        let mut start = block_start;
        while start + Duration::minutes(SLOT_MINUTES) <= block_end {
            let end = start + Duration::minutes(SLOT_MINUTES);
            let conflicted = busy
                .iter()
                .chain(extra_busy.iter())
                .any(|interval| interval.overlaps(start, end));

            slots.push(TimeSlot {
                start,
                end,
                duration_min: SLOT_MINUTES,
                agent_id: agent_id.to_string(),
                timezone: tz.name().to_string(),
                is_available: !conflicted,
                source: SLOT_SOURCE,
                confidence: if conflicted { CONFIDENCE_BUSY } else { CONFIDENCE_FREE },
                reason: conflicted.then(|| "Busy event overlaps (mock)".to_string()),
            });
            start += Duration::minutes(STEP_MINUTES);
        }
    }

    slots
}
