//! Rendering and writing of the per-event calendar artifact.
//!
//! One VCALENDAR with a single VEVENT per confirmed booking, written under
//! the configured output directory and referenced back to the caller as a
//! `file://` URL for external calendar import.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::errors::SchedulingError;
use crate::scheduling::booking::Event;

#[derive(Clone, Debug)]
pub struct IcsArtifact {
    pub path: std::path::PathBuf,
    pub url: String,
}

/// Render the VCALENDAR text for one event, stamped at `stamped_at`.
pub fn render_event(event: &Event, stamped_at: DateTime<Tz>) -> String {
    let uid = format!("{}@demo.local", event.event_id);
    let mut attendees = String::new();
    for attendee in &event.attendees {
        if let Some(email) = attendee.email.as_deref() {
            let cn = attendee.name.as_deref().unwrap_or_default();
            attendees.push_str(&format!("\nATTENDEE;CN={cn}:mailto:{email}"));
        }
    }

    format!(
        "BEGIN:VCALENDAR\n\
         VERSION:2.0\n\
         PRODID:-//Visita Demo//EN\n\
         CALSCALE:GREGORIAN\n\
         METHOD:PUBLISH\n\
         BEGIN:VEVENT\n\
         UID:{uid}\n\
         DTSTAMP:{}\n\
         DTSTART:{}\n\
         DTEND:{}\n\
         SUMMARY:{}\n\
         LOCATION:{}\n\
         DESCRIPTION:{}\n\
         STATUS:CONFIRMED{attendees}\n\
         END:VEVENT\n\
         END:VCALENDAR\n",
        ics_utc(stamped_at),
        ics_utc(event.start),
        ics_utc(event.end),
        event.title,
        event.location,
        event.description,
    )
}

/// Write the artifact as `<event_id>.ics` under `dir`, creating the
/// directory if needed.
pub fn write_event(dir: &Path, event: &Event) -> Result<IcsArtifact, SchedulingError> {
    let stamped_at = Utc::now().with_timezone(&event.start.timezone());
    let content = render_event(event, stamped_at);

    fs::create_dir_all(dir)
        .map_err(|source| SchedulingError::Artifact { path: dir.to_path_buf(), source })?;
    let path = dir.join(format!("{}.ics", event.event_id));
    fs::write(&path, content)
        .map_err(|source| SchedulingError::Artifact { path: path.clone(), source })?;

    let url = format!("file://{}", path.display());
    Ok(IcsArtifact { path, url })
}

/// ICS absolute form: UTC, `YYYYMMDDTHHMMSSZ`.
fn ics_utc(instant: DateTime<Tz>) -> String {
    instant.with_timezone(&Utc).format("%Y%m%dT%H%M%SZ").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono_tz::Europe::Rome;

    use super::{render_event, write_event};
    use crate::scheduling::booking::{Attendee, Event};

    fn event() -> Event {
        Event {
            event_id: "11111111-2222-3333-4444-555555555555".to_string(),
            agent_id: "agent1".to_string(),
            title: "Visit REF-123".to_string(),
            start: Rome.with_ymd_and_hms(2025, 8, 12, 10, 0, 0).unwrap(),
            end: Rome.with_ymd_and_hms(2025, 8, 12, 10, 45, 0).unwrap(),
            attendees: vec![
                Attendee {
                    email: Some("client@example.com".to_string()),
                    name: Some("Client Demo".to_string()),
                },
                // No email: no ATTENDEE line.
                Attendee { email: None, name: Some("Walk-in".to_string()) },
            ],
            location: "12 Via Torino, Milano".to_string(),
            description: "First contact".to_string(),
            created_at: Rome.with_ymd_and_hms(2025, 8, 1, 9, 0, 0).unwrap(),
            ics_url: String::new(),
        }
    }

    #[test]
    fn renders_utc_instants_and_confirmed_status() {
        let stamp = Rome.with_ymd_and_hms(2025, 8, 1, 9, 0, 0).unwrap();
        let ics = render_event(&event(), stamp);

        // August in Rome is UTC+2.
        assert!(ics.contains("DTSTART:20250812T080000Z"));
        assert!(ics.contains("DTEND:20250812T084500Z"));
        assert!(ics.contains("DTSTAMP:20250801T070000Z"));
        assert!(ics.contains("UID:11111111-2222-3333-4444-555555555555@demo.local"));
        assert!(ics.contains("SUMMARY:Visit REF-123"));
        assert!(ics.contains("LOCATION:12 Via Torino, Milano"));
        assert!(ics.contains("STATUS:CONFIRMED"));
        assert!(ics.contains("ATTENDEE;CN=Client Demo:mailto:client@example.com"));
        assert_eq!(ics.matches("ATTENDEE").count(), 1);
    }

    #[test]
    fn writes_artifact_keyed_by_event_id() {
        let dir = tempfile::tempdir().expect("temp dir");
        let artifact = write_event(dir.path(), &event()).expect("write succeeds");

        assert!(artifact.path.ends_with("11111111-2222-3333-4444-555555555555.ics"));
        assert!(artifact.url.starts_with("file://"));
        let content = std::fs::read_to_string(&artifact.path).expect("read back");
        assert!(content.contains("BEGIN:VEVENT"));
        assert!(content.contains("END:VCALENDAR"));
    }
}
