//! Availability and booking exposed as tools over the shared registry.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};
use visita_core::{BookingRegistry, CreateEventRequest, SchedulingError};

use super::Tool;

pub struct CheckAvailabilityTool {
    registry: Arc<BookingRegistry>,
}

impl CheckAvailabilityTool {
    pub fn new(registry: Arc<BookingRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl Tool for CheckAvailabilityTool {
    fn name(&self) -> &'static str {
        "check_availability"
    }

    fn description(&self) -> &'static str {
        "List visit slots for an agent over a window (today, tomorrow afternoon, next 7 days, 2025-08-12 morning)"
    }

    async fn execute(&self, input: Value) -> Result<Value> {
        let agent_id = input.get("agent_id").and_then(Value::as_str).unwrap_or_default();
        if agent_id.is_empty() {
            return Ok(json!({ "error": "missing `agent_id` argument" }));
        }
        let window = input.get("window").and_then(Value::as_str).unwrap_or_default();
        let slots = self.registry.check_availability(agent_id, window);
        Ok(json!({
            "agent_id": agent_id,
            "window": window,
            "slots": slots,
        }))
    }
}

pub struct CreateEventTool {
    registry: Arc<BookingRegistry>,
}

impl CreateEventTool {
    pub fn new(registry: Arc<BookingRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl Tool for CreateEventTool {
    fn name(&self) -> &'static str {
        "create_event"
    }

    fn description(&self) -> &'static str {
        "Book a visit appointment for an agent (start/end ISO datetimes, title, optional attendees)"
    }

    async fn execute(&self, input: Value) -> Result<Value> {
        let request: CreateEventRequest = match serde_json::from_value(input) {
            Ok(request) => request,
            Err(error) => return Ok(json!({ "error": format!("invalid arguments: {error}") })),
        };

        match self.registry.create_event(request) {
            Ok(confirmation) => Ok(json!({
                "event_id": confirmation.event_id,
                "ics_url": confirmation.ics_url,
                "start": confirmation.start.to_rfc3339(),
                "end": confirmation.end.to_rfc3339(),
                "agent_id": confirmation.agent_id,
            })),
            // Domain failures stay inline so the model can propose another
            // slot or ask the client to fix the input.
            Err(error @ (SchedulingError::BadRequest(_) | SchedulingError::Conflict { .. })) => {
                Ok(json!({ "error": error.to_string() }))
            }
            Err(error) => Err(error.into()),
        }
    }
}
