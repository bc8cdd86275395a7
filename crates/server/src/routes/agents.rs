use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_agents(State(state): State<AppState>) -> Json<Value> {
    let agents: Vec<Value> = state
        .directory
        .agents()
        .iter()
        .map(|agent| {
            json!({
                "id": agent.id,
                "name": agent.name,
                "specialities": agent.specialities,
                "languages": agent.languages,
            })
        })
        .collect();
    Json(json!({ "agents": agents }))
}

pub async fn get_agent(
    State(state): State<AppState>,
    Path(agent_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let agent = state.directory.agent(&agent_id)?;
    Ok(Json(serde_json::to_value(agent).unwrap_or_default()))
}
