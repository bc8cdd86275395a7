use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use visita_core::CreateEventRequest;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AvailabilityRequest {
    pub agent_id: String,
    #[serde(default)]
    pub window: String,
}

pub async fn check_availability(
    State(state): State<AppState>,
    Json(request): Json<AvailabilityRequest>,
) -> Json<Value> {
    let slots = state.registry.check_availability(&request.agent_id, &request.window);
    Json(json!({
        "agent_id": request.agent_id,
        "window": request.window,
        "slots": slots,
    }))
}

pub async fn create_appointment(
    State(state): State<AppState>,
    Json(request): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let confirmation = state.registry.create_event(request)?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "event_id": confirmation.event_id,
            "ics_url": confirmation.ics_url,
            "start": confirmation.start.to_rfc3339(),
            "end": confirmation.end.to_rfc3339(),
            "agent_id": confirmation.agent_id,
        })),
    ))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use chrono::{Datelike, NaiveDate};
    use tower::ServiceExt;
    use visita_core::scheduling::occupancy::synthetic_busy;

    use crate::routes::{router, test_support};

    fn quiet_day(agent: &str) -> NaiveDate {
        (1..=30)
            .map(|d| NaiveDate::from_ymd_opt(2025, 9, d).unwrap())
            .find(|day| {
                day.weekday().number_from_monday() <= 5
                    && synthetic_busy(agent, *day, chrono_tz::Europe::Rome).is_empty()
            })
            .expect("free weekday")
    }

    fn post(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    #[tokio::test]
    async fn availability_returns_slot_records() {
        let dir = tempfile::tempdir().expect("temp dir");
        let app = router(test_support::state(dir.path(), vec![]));

        let response = app
            .oneshot(post(
                "/appointments/availability",
                serde_json::json!({"agent_id": "agent1", "window": "next 7 days"}),
            ))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), 256 * 1024).await.expect("body");
        let payload: serde_json::Value = serde_json::from_slice(&bytes).expect("json");
        assert!(!payload["slots"].as_array().expect("slots").is_empty());
    }

    #[tokio::test]
    async fn booking_then_rebooking_conflicts_with_409() {
        let dir = tempfile::tempdir().expect("temp dir");
        let app = router(test_support::state(dir.path(), vec![]));
        let day = quiet_day("agent1");

        let body = serde_json::json!({
            "agent_id": "agent1",
            "start": format!("{day}T10:00:00"),
            "end": format!("{day}T10:45:00"),
            "title": "Visit REF-123",
        });

        let created = app
            .clone()
            .oneshot(post("/appointments", body))
            .await
            .expect("response");
        assert_eq!(created.status(), StatusCode::CREATED);

        // Overlapping but not identical, so no idempotent short-circuit.
        let overlapping = serde_json::json!({
            "agent_id": "agent1",
            "start": format!("{day}T10:30:00"),
            "end": format!("{day}T11:15:00"),
            "title": "Visit REF-456",
        });
        let conflicted = app
            .oneshot(post("/appointments", overlapping))
            .await
            .expect("response");
        assert_eq!(conflicted.status(), StatusCode::CONFLICT);

        let bytes =
            axum::body::to_bytes(conflicted.into_body(), 64 * 1024).await.expect("body");
        let payload: serde_json::Value = serde_json::from_slice(&bytes).expect("json");
        assert!(payload["error"].as_str().expect("error").contains("overlaps"));
    }

    #[tokio::test]
    async fn short_title_is_400() {
        let dir = tempfile::tempdir().expect("temp dir");
        let app = router(test_support::state(dir.path(), vec![]));
        let day = quiet_day("agent1");

        let response = app
            .oneshot(post(
                "/appointments",
                serde_json::json!({
                    "agent_id": "agent1",
                    "start": format!("{day}T10:00:00"),
                    "end": format!("{day}T10:45:00"),
                    "title": "ab",
                }),
            ))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
