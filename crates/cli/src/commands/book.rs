use serde_json::json;
use visita_core::{Attendee, CreateEventRequest};

use super::{core_context, CommandResult};

pub struct BookArgs {
    pub agent_id: String,
    pub start: String,
    pub end: String,
    pub title: String,
    pub attendee_email: Option<String>,
    pub attendee_name: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub allow_conflict: bool,
}

pub fn run(args: BookArgs) -> CommandResult {
    let (_config, directory, registry) = match core_context() {
        Ok(context) => context,
        Err(message) => return CommandResult::failure("book", "config", message),
    };

    if let Err(error) = directory.agent(&args.agent_id) {
        return CommandResult::failure("book", error.class(), error.to_string());
    }

    let attendees = if args.attendee_email.is_some() || args.attendee_name.is_some() {
        vec![Attendee { email: args.attendee_email, name: args.attendee_name }]
    } else {
        Vec::new()
    };

    let request = CreateEventRequest {
        agent_id: args.agent_id,
        start: args.start,
        end: args.end,
        title: args.title,
        attendees,
        location: args.location,
        description: args.description,
        allow_conflict: args.allow_conflict,
    };

    match registry.create_event(request) {
        Ok(confirmation) => CommandResult::success(
            "book",
            json!({
                "event_id": confirmation.event_id,
                "agent_id": confirmation.agent_id,
                "start": confirmation.start.to_rfc3339(),
                "end": confirmation.end.to_rfc3339(),
                "ics_url": confirmation.ics_url,
            }),
        ),
        Err(error) => CommandResult::failure("book", error.class(), error.to_string()),
    }
}
