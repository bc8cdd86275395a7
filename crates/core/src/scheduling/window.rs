use chrono::{DateTime, Duration, NaiveDate, Timelike};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::scheduling::zoned_hour;

/// Coarse filter narrowing which working block(s) a day contributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayPart {
    Morning,
    Afternoon,
}

/// A concrete `[start, end)` search range resolved from user text.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeWindow {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub daypart: Option<DayPart>,
}

/// Resolve a natural-language window expression against `now`.
///
/// Recognized, case-insensitively and with an optional `morning` /
/// `afternoon` token anywhere in the text:
/// - `today` or an empty string: the current calendar day
/// - `tomorrow`: the next calendar day
/// - `next N days`: `[now, now + N days)`
/// - `YYYY-MM-DD`: that calendar day
///
/// Anything else degrades silently to `[now, now + fallback_days days)`;
/// the assistant should offer something rather than fail a fuzzy request.
pub fn parse_window(text: &str, now: DateTime<Tz>, fallback_days: u32) -> TimeWindow {
    let now = truncate_to_hour(now);
    let tz = now.timezone();
    let mut w = text.trim().to_lowercase();

    let daypart = if w.contains("morning") {
        w = w.replace("morning", "").trim().to_string();
        Some(DayPart::Morning)
    } else if w.contains("afternoon") {
        w = w.replace("afternoon", "").trim().to_string();
        Some(DayPart::Afternoon)
    } else {
        None
    };

    let (start, end) = if w.is_empty() || w == "today" {
        let start = zoned_hour(tz, now.date_naive(), 0);
        (start, start + Duration::days(1))
    } else if w == "tomorrow" {
        let start = zoned_hour(tz, now.date_naive() + Duration::days(1), 0);
        (start, start + Duration::days(1))
    } else if let Some(days) = parse_next_days(&w) {
        (now, now + Duration::days(i64::from(days)))
    } else if let Ok(date) = NaiveDate::parse_from_str(&w, "%Y-%m-%d") {
        let start = zoned_hour(tz, date, 0);
        (start, start + Duration::days(1))
    } else {
        (now, now + Duration::days(i64::from(fallback_days)))
    };

    TimeWindow { start, end, daypart }
}

/// Match `next N days` (also accepts the singular `next 1 day`).
fn parse_next_days(text: &str) -> Option<u32> {
    let rest = text.strip_prefix("next")?.trim();
    let mut parts = rest.split_whitespace();
    let count: u32 = parts.next()?.parse().ok()?;
    let unit = parts.next()?;
    if parts.next().is_some() || !matches!(unit, "day" | "days") || count == 0 {
        return None;
    }
    Some(count)
}

fn truncate_to_hour(now: DateTime<Tz>) -> DateTime<Tz> {
    now.with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono_tz::Europe::Rome;

    use super::{parse_window, DayPart};

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> chrono::DateTime<chrono_tz::Tz> {
        Rome.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn today_covers_the_current_calendar_day() {
        let window = parse_window("today", at(2025, 1, 15, 10, 30), 7);
        assert_eq!(window.start, at(2025, 1, 15, 0, 0));
        assert_eq!(window.end, at(2025, 1, 16, 0, 0));
        assert_eq!(window.daypart, None);
    }

    #[test]
    fn empty_string_behaves_like_today() {
        let window = parse_window("", at(2025, 1, 15, 10, 0), 7);
        assert_eq!(window.start, at(2025, 1, 15, 0, 0));
        assert_eq!(window.end, at(2025, 1, 16, 0, 0));
    }

    #[test]
    fn tomorrow_afternoon_extracts_the_daypart() {
        let window = parse_window("Tomorrow Afternoon", at(2025, 1, 15, 10, 0), 7);
        assert_eq!(window.start, at(2025, 1, 16, 0, 0));
        assert_eq!(window.end, at(2025, 1, 17, 0, 0));
        assert_eq!(window.daypart, Some(DayPart::Afternoon));
    }

    #[test]
    fn next_seven_days_starts_at_the_truncated_now() {
        let window = parse_window("next 7 days", at(2025, 1, 1, 10, 0), 7);
        assert_eq!(window.start, at(2025, 1, 1, 10, 0));
        assert_eq!(window.end, at(2025, 1, 8, 10, 0));
        assert_eq!(window.daypart, None);
    }

    #[test]
    fn now_is_truncated_to_the_hour_before_use() {
        let window = parse_window("next 2 days", at(2025, 1, 1, 10, 45), 7);
        assert_eq!(window.start, at(2025, 1, 1, 10, 0));
    }

    #[test]
    fn iso_date_selects_that_day_with_morning_filter() {
        let window = parse_window("2025-08-12 morning", at(2025, 8, 1, 9, 0), 7);
        assert_eq!(window.start, at(2025, 8, 12, 0, 0));
        assert_eq!(window.end, at(2025, 8, 13, 0, 0));
        assert_eq!(window.daypart, Some(DayPart::Morning));
    }

    #[test]
    fn unrecognized_text_falls_back_to_the_default_window() {
        let window = parse_window("whenever works", at(2025, 1, 1, 10, 0), 7);
        assert_eq!(window.start, at(2025, 1, 1, 10, 0));
        assert_eq!(window.end, at(2025, 1, 8, 10, 0));
        assert_eq!(window.daypart, None);
    }

    #[test]
    fn malformed_next_clause_falls_back() {
        let window = parse_window("next zero days", at(2025, 1, 1, 10, 0), 3);
        assert_eq!(window.end, at(2025, 1, 4, 10, 0));
    }
}
