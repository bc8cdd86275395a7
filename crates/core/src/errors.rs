use std::path::PathBuf;

use thiserror::Error;

use crate::scheduling::occupancy::OccupancyInterval;

/// Error taxonomy of the scheduling core.
///
/// The core never renders HTTP status codes or chat-facing strings; the
/// server and tool layers translate these variants at their own edges.
#[derive(Debug, Error)]
pub enum SchedulingError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("slot unavailable: overlaps {}..{}", first_conflict.start.to_rfc3339(), first_conflict.end.to_rfc3339())]
    Conflict { first_conflict: OccupancyInterval },
    #[error("{kind} `{id}` not found")]
    NotFound { kind: &'static str, id: String },
    #[error("calendar artifact write failed at `{path}`: {source}")]
    Artifact { path: PathBuf, source: std::io::Error },
}

impl SchedulingError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound { kind, id: id.into() }
    }

    /// Stable machine-readable class, used by the outer layers for mapping
    /// and by structured logs.
    pub fn class(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::Conflict { .. } => "conflict",
            Self::NotFound { .. } => "not_found",
            Self::Artifact { .. } => "artifact",
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono_tz::Europe::Rome;

    use super::SchedulingError;
    use crate::scheduling::occupancy::OccupancyInterval;

    #[test]
    fn conflict_message_names_first_overlapping_interval() {
        let interval = OccupancyInterval {
            start: Rome.with_ymd_and_hms(2025, 8, 12, 10, 0, 0).unwrap(),
            end: Rome.with_ymd_and_hms(2025, 8, 12, 10, 45, 0).unwrap(),
        };
        let error = SchedulingError::Conflict { first_conflict: interval };

        let rendered = error.to_string();
        assert!(rendered.contains("2025-08-12T10:00:00"));
        assert!(rendered.contains("2025-08-12T10:45:00"));
        assert_eq!(error.class(), "conflict");
    }

    #[test]
    fn not_found_carries_kind_and_id() {
        let error = SchedulingError::not_found("agent", "agent9");
        assert_eq!(error.to_string(), "agent `agent9` not found");
        assert_eq!(error.class(), "not_found");
    }
}
