use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub booked_events: usize,
    pub timezone: String,
    pub checked_at: String,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ready",
        service: "visita-server",
        booked_events: state.registry.event_count(),
        timezone: state.registry.timezone().name().to_string(),
        checked_at: Utc::now().to_rfc3339(),
    })
}
