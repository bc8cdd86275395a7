//! HTTP surface of the assistant.
//!
//! - `GET  /health`                      — liveness and registry stats
//! - `GET  /agents`                      — list agents
//! - `GET  /agents/{agent_id}`           — one agent profile
//! - `GET  /properties`                  — list/search listings (query params)
//! - `GET  /properties/{property_id}`    — one listing
//! - `POST /appointments/availability`   — slot search for an agent
//! - `POST /appointments`                — book a visit
//! - `POST /chat`                        — one assistant turn

pub mod agents;
pub mod appointments;
pub mod chat;
pub mod health;
pub mod properties;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/agents", get(agents::list_agents))
        .route("/agents/{agent_id}", get(agents::get_agent))
        .route("/properties", get(properties::list_properties))
        .route("/properties/{property_id}", get(properties::get_property))
        .route("/appointments/availability", post(appointments::check_availability))
        .route("/appointments", post(appointments::create_appointment))
        .route("/chat", post(chat::chat))
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use visita_core::config::AppConfig;
    use visita_agent::ScriptedLlm;

    use crate::state::AppState;

    /// A state with an isolated ICS directory and a scripted model.
    pub fn state(ics_dir: &std::path::Path, turns: Vec<&str>) -> AppState {
        let mut config = AppConfig::default();
        config.calendar.ics_dir = ics_dir.to_path_buf();
        AppState::with_llm(config, Arc::new(ScriptedLlm::new(turns)))
    }
}
