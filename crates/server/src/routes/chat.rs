use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::state::AppState;

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub thread_id: Option<String>,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub thread_id: String,
    pub timestamp: String,
}

pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<serde_json::Value>)> {
    let thread_id = request.thread_id.unwrap_or_else(|| Uuid::new_v4().to_string());

    match state.runtime.handle_message(&request.message).await {
        Ok(response) => Ok(Json(ChatResponse {
            response,
            thread_id,
            timestamp: Utc::now().to_rfc3339(),
        })),
        Err(error) => {
            tracing::error!(
                event_name = "http.chat.failed",
                thread_id = %thread_id,
                error = %error,
                "assistant turn failed"
            );
            Err((
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": "the assistant is unavailable right now" })),
            ))
        }
    }
}
