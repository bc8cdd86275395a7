//! Scheduling and directory core for the visita demo assistant.
//!
//! Everything in this crate is deliberately in-memory and deterministic:
//! agent calendars are simulated from a stable hash, bookings live for the
//! lifetime of the process, and the only durable artifact is the ICS file
//! emitted on a confirmed event. The HTTP and tool-calling layers sit on
//! top of this crate and never reach around it.

pub mod config;
pub mod directory;
pub mod errors;
pub mod ics;
pub mod scheduling;

pub use config::{AppConfig, ConfigError, LoadOptions};
pub use directory::{AgentProfile, Directory, PropertyListing, PropertySearch};
pub use errors::SchedulingError;
pub use scheduling::booking::{
    Attendee, BookingConfirmation, BookingRegistry, CreateEventRequest, Event,
};
pub use scheduling::occupancy::OccupancyInterval;
pub use scheduling::slots::TimeSlot;
pub use scheduling::window::{DayPart, TimeWindow};
