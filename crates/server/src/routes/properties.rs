use axum::extract::{Path, Query, State};
use axum::Json;
use serde_json::{json, Value};
use visita_core::PropertySearch;

use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_properties(
    State(state): State<AppState>,
    Query(criteria): Query<PropertySearch>,
) -> Json<Value> {
    let properties: Vec<Value> = state
        .directory
        .search_properties(&criteria)
        .into_iter()
        .map(|property| {
            json!({
                "id": property.id,
                "title": property.title,
                "kind": property.kind,
                "price": property.price,
                "location": property.location,
                "surface_sqm": property.surface_sqm,
                "rooms": property.rooms,
                "bedrooms": property.bedrooms,
                "agent_id": property.agent_id,
            })
        })
        .collect();
    Json(json!({ "count": properties.len(), "properties": properties }))
}

pub async fn get_property(
    State(state): State<AppState>,
    Path(property_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let property = state.directory.property(&property_id)?;
    Ok(Json(serde_json::to_value(property).unwrap_or_default()))
}
