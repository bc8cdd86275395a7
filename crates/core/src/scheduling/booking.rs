use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::CalendarConfig;
use crate::errors::SchedulingError;
use crate::ics;
use crate::scheduling::availability::check_availability;
use crate::scheduling::occupancy::{synthetic_busy, OccupancyInterval};
use crate::scheduling::slots::TimeSlot;

const MIN_EVENT_MINUTES: i64 = 15;
const MIN_TITLE_CHARS: usize = 3;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendee {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub agent_id: String,
    /// ISO-8601 datetime; a missing offset means the reference zone.
    pub start: String,
    pub end: String,
    pub title: String,
    #[serde(default)]
    pub attendees: Vec<Attendee>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub allow_conflict: bool,
}

/// A confirmed booking, owned by the registry for the process lifetime.
#[derive(Clone, Debug, Serialize)]
pub struct Event {
    pub event_id: String,
    pub agent_id: String,
    pub title: String,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub attendees: Vec<Attendee>,
    pub location: String,
    pub description: String,
    pub created_at: DateTime<Tz>,
    pub ics_url: String,
}

/// What a successful `create_event` hands back to callers.
#[derive(Clone, Debug, Serialize)]
pub struct BookingConfirmation {
    pub event_id: String,
    pub ics_url: String,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub agent_id: String,
}

#[derive(Default)]
struct RegistryState {
    events: HashMap<String, Event>,
    agent_busy: HashMap<String, Vec<OccupancyInterval>>,
}

/// In-memory store of confirmed events, one per process, injected into the
/// HTTP and tool layers rather than living in a global.
///
/// The interior mutex makes the collect-busy / check-overlap / commit
/// sequence atomic, so concurrent callers cannot double-book an agent.
pub struct BookingRegistry {
    tz: Tz,
    ics_dir: PathBuf,
    fallback_days: u32,
    inner: Mutex<RegistryState>,
}

impl BookingRegistry {
    pub fn new(calendar: &CalendarConfig) -> Self {
        Self {
            tz: calendar.timezone,
            ics_dir: calendar.ics_dir.clone(),
            fallback_days: calendar.default_window_days,
            inner: Mutex::new(RegistryState::default()),
        }
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Booking-aware availability: committed events are folded into the
    /// busy set, so an already-booked slot reads as unavailable.
    pub fn check_availability(&self, agent_id: &str, window: &str) -> Vec<TimeSlot> {
        let now = Utc::now().with_timezone(&self.tz);
        self.check_availability_at(agent_id, window, now)
    }

    /// Same as [`check_availability`](Self::check_availability) with an
    /// explicit `now`, for deterministic tests.
    pub fn check_availability_at(
        &self,
        agent_id: &str,
        window: &str,
        now: DateTime<Tz>,
    ) -> Vec<TimeSlot> {
        let booked = self.committed_intervals(agent_id);
        check_availability(agent_id, window, now, &booked, self.fallback_days)
    }

    /// Validate, conflict-check and commit a booking.
    ///
    /// Identical requests are idempotent: the derived event id already
    /// existing in the registry short-circuits to the stored confirmation
    /// instead of failing the retry with a conflict against itself.
    pub fn create_event(
        &self,
        request: CreateEventRequest,
    ) -> Result<BookingConfirmation, SchedulingError> {
        let title = request.title.trim();
        if title.chars().count() < MIN_TITLE_CHARS {
            return Err(SchedulingError::bad_request(format!(
                "title must be at least {MIN_TITLE_CHARS} characters"
            )));
        }

        let start = normalize_datetime(&request.start, self.tz)?;
        let end = normalize_datetime(&request.end, self.tz)?;
        if end <= start {
            return Err(SchedulingError::bad_request("end must be after start"));
        }
        if end - start < Duration::minutes(MIN_EVENT_MINUTES) {
            return Err(SchedulingError::bad_request(format!(
                "minimum event duration is {MIN_EVENT_MINUTES} minutes"
            )));
        }

        let attendees = validate_attendees(&request.attendees)?;
        let location = request.location.unwrap_or_default();
        let event_id = derive_event_id(&request.agent_id, start, end, title, &location);

        let mut state = lock_state(&self.inner);

        if let Some(existing) = state.events.get(&event_id) {
            return Ok(confirmation_of(existing));
        }

        let busy = collect_busy(&state, &request.agent_id, start, end, self.tz);
        if let Some(first_conflict) = busy.iter().find(|b| b.overlaps(start, end)) {
            if !request.allow_conflict {
                return Err(SchedulingError::Conflict {
                    first_conflict: first_conflict.clone(),
                });
            }
        }

        let mut event = Event {
            event_id: event_id.clone(),
            agent_id: request.agent_id.clone(),
            title: title.to_string(),
            start,
            end,
            attendees,
            location,
            description: request.description.unwrap_or_default(),
            created_at: Utc::now().with_timezone(&self.tz),
            ics_url: String::new(),
        };

        // Artifact first: a failed write must not leave a half-committed
        // booking behind.
        let artifact = ics::write_event(&self.ics_dir, &event)?;
        event.ics_url = artifact.url;

        let confirmation = confirmation_of(&event);
        state
            .agent_busy
            .entry(request.agent_id.clone())
            .or_default()
            .push(OccupancyInterval { start, end });
        state.events.insert(event_id.clone(), event);

        tracing::info!(
            event_name = "scheduling.event.created",
            event_id = %event_id,
            agent_id = %request.agent_id,
            start = %start.to_rfc3339(),
            end = %end.to_rfc3339(),
            allow_conflict = request.allow_conflict,
            "visit appointment committed"
        );

        Ok(confirmation)
    }

    /// Intervals occupied by committed events for one agent.
    pub fn committed_intervals(&self, agent_id: &str) -> Vec<OccupancyInterval> {
        let state = lock_state(&self.inner);
        state.agent_busy.get(agent_id).cloned().unwrap_or_default()
    }

    pub fn event(&self, event_id: &str) -> Option<Event> {
        let state = lock_state(&self.inner);
        state.events.get(event_id).cloned()
    }

    pub fn event_count(&self) -> usize {
        lock_state(&self.inner).events.len()
    }
}

fn lock_state(inner: &Mutex<RegistryState>) -> std::sync::MutexGuard<'_, RegistryState> {
    // A poisoned lock only means another caller panicked mid-commit; the
    // state itself is a plain map and stays usable.
    match inner.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn confirmation_of(event: &Event) -> BookingConfirmation {
    BookingConfirmation {
        event_id: event.event_id.clone(),
        ics_url: event.ics_url.clone(),
        start: event.start,
        end: event.end,
        agent_id: event.agent_id.clone(),
    }
}

/// Union of synthetic occupancy for every day touched by `[start, end)` and
/// all committed events for the agent.
fn collect_busy(
    state: &RegistryState,
    agent_id: &str,
    start: DateTime<Tz>,
    end: DateTime<Tz>,
    tz: Tz,
) -> Vec<OccupancyInterval> {
    let mut busy = Vec::new();
    let mut day = start.date_naive();
    loop {
        let day_start = crate::scheduling::zoned_hour(tz, day, 0);
        if day_start >= end {
            break;
        }
        busy.extend(synthetic_busy(agent_id, day, tz));
        day += Duration::days(1);
    }
    if let Some(committed) = state.agent_busy.get(agent_id) {
        busy.extend(committed.iter().cloned());
    }
    busy
}

fn derive_event_id(
    agent_id: &str,
    start: DateTime<Tz>,
    end: DateTime<Tz>,
    title: &str,
    location: &str,
) -> String {
    let payload = format!(
        "{agent_id}|{}|{}|{title}|{location}",
        start.to_rfc3339(),
        end.to_rfc3339()
    );
    Uuid::new_v5(&Uuid::NAMESPACE_DNS, payload.as_bytes()).to_string()
}

/// Parse an ISO-8601 datetime; inputs without an offset are interpreted in
/// the reference zone, and everything is normalized to it.
fn normalize_datetime(input: &str, tz: Tz) -> Result<DateTime<Tz>, SchedulingError> {
    let trimmed = input.trim();
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(with_offset.with_timezone(&tz));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            if let Some(instant) = tz.from_local_datetime(&naive).earliest() {
                return Ok(instant);
            }
        }
    }
    Err(SchedulingError::bad_request(format!("unparseable datetime `{input}`")))
}

fn validate_attendees(attendees: &[Attendee]) -> Result<Vec<Attendee>, SchedulingError> {
    let mut normalized = Vec::with_capacity(attendees.len());
    for attendee in attendees {
        if let Some(email) = attendee.email.as_deref() {
            if !is_valid_email(email) {
                return Err(SchedulingError::bad_request(format!("invalid email `{email}`")));
            }
        }
        normalized.push(Attendee {
            email: attendee.email.clone(),
            name: attendee.name.clone().or_else(|| Some(String::new())),
        });
    }
    Ok(normalized)
}

/// Basic `local@domain.tld` shape: one `@`, no whitespace, a dot in the
/// domain with non-empty labels around it.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, NaiveDate, Timelike};
    use chrono_tz::Europe::Rome;

    use super::{is_valid_email, Attendee, BookingRegistry, CreateEventRequest};
    use crate::config::CalendarConfig;
    use crate::errors::SchedulingError;
    use crate::scheduling::occupancy::synthetic_busy;

    fn registry(dir: &std::path::Path) -> BookingRegistry {
        BookingRegistry::new(&CalendarConfig {
            timezone: Rome,
            ics_dir: dir.to_path_buf(),
            default_window_days: 7,
        })
    }

    fn request(agent: &str, start: &str, end: &str, title: &str) -> CreateEventRequest {
        CreateEventRequest {
            agent_id: agent.to_string(),
            start: start.to_string(),
            end: end.to_string(),
            title: title.to_string(),
            attendees: Vec::new(),
            location: None,
            description: None,
            allow_conflict: false,
        }
    }

    /// First weekday in a fixed month with no synthetic occupancy for the
    /// agent, so bookings there cannot collide with the mock calendar.
    fn quiet_day(agent: &str) -> NaiveDate {
        (1..=30)
            .map(|d| NaiveDate::from_ymd_opt(2025, 9, d).unwrap())
            .find(|day| {
                day.weekday().number_from_monday() <= 5
                    && synthetic_busy(agent, *day, Rome).is_empty()
            })
            .expect("free weekday")
    }

    /// First weekday whose synthetic calendar has a morning busy event.
    fn busy_morning(agent: &str) -> (NaiveDate, u32) {
        (1..=30)
            .map(|d| NaiveDate::from_ymd_opt(2025, 9, d).unwrap())
            .filter(|day| day.weekday().number_from_monday() <= 5)
            .find_map(|day| {
                synthetic_busy(agent, day, Rome)
                    .into_iter()
                    .find(|b| b.start.hour() < 12)
                    .map(|b| (day, b.start.hour()))
            })
            .expect("busy morning within a month")
    }

    #[test]
    fn books_a_free_slot_and_emits_an_ics_artifact() {
        let dir = tempfile::tempdir().expect("temp dir");
        let registry = registry(dir.path());
        let day = quiet_day("agent1");

        let confirmation = registry
            .create_event(request(
                "agent1",
                &format!("{day}T10:00:00"),
                &format!("{day}T10:45:00"),
                "Visit REF-123",
            ))
            .expect("booking succeeds");

        assert_eq!(confirmation.agent_id, "agent1");
        assert!(confirmation.ics_url.starts_with("file://"));
        assert!(dir.path().join(format!("{}.ics", confirmation.event_id)).exists());
        assert_eq!(registry.event_count(), 1);
    }

    #[test]
    fn short_title_is_a_bad_request_and_mutates_nothing() {
        let dir = tempfile::tempdir().expect("temp dir");
        let registry = registry(dir.path());
        let day = quiet_day("agent1");

        let error = registry
            .create_event(request("agent1", &format!("{day}T10:00:00"), &format!("{day}T10:45:00"), "  ab "))
            .expect_err("short title");
        assert!(matches!(error, SchedulingError::BadRequest(_)));
        assert_eq!(registry.event_count(), 0);
    }

    #[test]
    fn sub_15_minute_events_are_rejected() {
        let dir = tempfile::tempdir().expect("temp dir");
        let registry = registry(dir.path());
        let day = quiet_day("agent1");

        let error = registry
            .create_event(request("agent1", &format!("{day}T10:00:00"), &format!("{day}T10:10:00"), "Visit"))
            .expect_err("too short");
        assert!(matches!(error, SchedulingError::BadRequest(_)));
        assert_eq!(registry.event_count(), 0);
    }

    #[test]
    fn inverted_interval_is_rejected() {
        let dir = tempfile::tempdir().expect("temp dir");
        let registry = registry(dir.path());
        let day = quiet_day("agent1");

        let error = registry
            .create_event(request("agent1", &format!("{day}T11:00:00"), &format!("{day}T10:00:00"), "Visit"))
            .expect_err("end before start");
        assert!(matches!(error, SchedulingError::BadRequest(_)));
    }

    #[test]
    fn malformed_attendee_email_is_rejected() {
        let dir = tempfile::tempdir().expect("temp dir");
        let registry = registry(dir.path());
        let day = quiet_day("agent1");

        let mut req =
            request("agent1", &format!("{day}T10:00:00"), &format!("{day}T10:45:00"), "Visit");
        req.attendees = vec![Attendee { email: Some("not-an-email".to_string()), name: None }];

        let error = registry.create_event(req).expect_err("bad email");
        assert!(matches!(error, SchedulingError::BadRequest(_)));
        assert_eq!(registry.event_count(), 0);
    }

    #[test]
    fn synthetic_occupancy_conflicts_unless_overridden() {
        let dir = tempfile::tempdir().expect("temp dir");
        let registry = registry(dir.path());
        let (day, hour) = busy_morning("agent2");

        let req = request(
            "agent2",
            &format!("{day}T{hour:02}:00:00"),
            &format!("{day}T{hour:02}:45:00"),
            "Visit REF-456",
        );

        let error = registry.create_event(req.clone()).expect_err("mock busy overlap");
        assert!(matches!(error, SchedulingError::Conflict { .. }));
        assert_eq!(registry.event_count(), 0);

        let mut forced = req;
        forced.allow_conflict = true;
        let confirmation = registry.create_event(forced).expect("override succeeds");

        // The forced booking now counts as occupancy for later checks.
        let overlapping = registry.committed_intervals("agent2");
        assert_eq!(overlapping.len(), 1);
        assert_eq!(overlapping[0].start, confirmation.start);
    }

    #[test]
    fn prior_bookings_conflict_with_later_requests() {
        let dir = tempfile::tempdir().expect("temp dir");
        let registry = registry(dir.path());
        let day = quiet_day("agent1");

        registry
            .create_event(request("agent1", &format!("{day}T10:00:00"), &format!("{day}T10:45:00"), "First visit"))
            .expect("first booking");

        let error = registry
            .create_event(request("agent1", &format!("{day}T10:30:00"), &format!("{day}T11:15:00"), "Second visit"))
            .expect_err("overlaps first booking");
        assert!(matches!(error, SchedulingError::Conflict { .. }));
        assert_eq!(registry.event_count(), 1);
    }

    #[test]
    fn identical_request_is_an_idempotent_no_op() {
        let dir = tempfile::tempdir().expect("temp dir");
        let registry = registry(dir.path());
        let day = quiet_day("agent3");

        let req = request(
            "agent3",
            &format!("{day}T10:00:00"),
            &format!("{day}T10:45:00"),
            "Visit REF-789",
        );
        let first = registry.create_event(req.clone()).expect("first booking");
        let replay = registry.create_event(req).expect("replay returns stored event");

        assert_eq!(first.event_id, replay.event_id);
        assert_eq!(registry.event_count(), 1);
        assert_eq!(registry.committed_intervals("agent3").len(), 1);
    }

    #[test]
    fn booked_slot_reads_as_unavailable_afterwards() {
        let dir = tempfile::tempdir().expect("temp dir");
        let registry = registry(dir.path());
        let day = quiet_day("agent1");

        registry
            .create_event(request("agent1", &format!("{day}T10:00:00"), &format!("{day}T10:45:00"), "Visit REF-123"))
            .expect("booking succeeds");

        let now = crate::scheduling::zoned_hour(Rome, day, 7);
        let slots = registry.check_availability_at("agent1", &day.to_string(), now);
        let ten = slots.iter().find(|s| s.start.hour() == 10).expect("10:00 slot");
        assert!(!ten.is_available);
    }

    #[test]
    fn offsets_are_normalized_to_the_reference_zone() {
        let dir = tempfile::tempdir().expect("temp dir");
        let registry = registry(dir.path());
        let day = quiet_day("agent1");

        // Same instant expressed in UTC; September in Rome is +02:00.
        let confirmation = registry
            .create_event(request(
                "agent1",
                &format!("{day}T08:00:00Z"),
                &format!("{day}T08:45:00Z"),
                "UTC client",
            ))
            .expect("utc input accepted");

        assert_eq!(confirmation.start.hour(), 10);
        assert_eq!(confirmation.start.timezone(), Rome);
    }

    #[test]
    fn email_shape_validation_is_basic_but_strict() {
        assert!(is_valid_email("client@example.com"));
        assert!(is_valid_email("first.last@mail.co.uk"));
        assert!(!is_valid_email("no-at-sign.example.com"));
        assert!(!is_valid_email("two@@example.com"));
        assert!(!is_valid_email("spaced name@example.com"));
        assert!(!is_valid_email("client@nodot"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("client@.com"));
    }
}
