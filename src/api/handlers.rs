//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::AppState;
use super::types::{ErrorResponse, StateResponse, TelemetryQuery, TelemetryRecord};

/// Returns the scenario echo, run summary, and latest hour record.
///
/// `GET /state` → 200 + `StateResponse` JSON
pub async fn get_state(State(state): State<Arc<AppState>>) -> Json<StateResponse> {
    let latest_hour = state.results.all().last().map(TelemetryRecord::from);

    Json(StateResponse {
        config: state.config.clone(),
        summary: state.summary.clone(),
        latest_hour,
    })
}

/// Returns hour records, optionally filtered by hour range.
///
/// `GET /telemetry` → 200 + `Vec<TelemetryRecord>` JSON
/// `GET /telemetry?from=N&to=M` → filtered range (inclusive)
/// `GET /telemetry?from=10&to=5` → 400 + `ErrorResponse`
pub async fn get_telemetry(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TelemetryQuery>,
) -> impl IntoResponse {
    let from = query.from.unwrap_or(0);
    let to = query.to.unwrap_or(usize::MAX);

    if from > to {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("`from` ({from}) must be <= `to` ({to})"),
            }),
        ));
    }

    let records: Vec<TelemetryRecord> = state
        .results
        .all()
        .iter()
        .filter(|r| r.hour >= from && r.hour <= to)
        .map(TelemetryRecord::from)
        .collect();

    Ok(Json(records))
}

/// Returns the record of a single hour for the detail panel.
///
/// `GET /hours/{hour}` → 200 + `TelemetryRecord` JSON
/// `GET /hours/{hour}` with an out-of-range hour → 404 + `ErrorResponse`
pub async fn get_hour(
    State(state): State<Arc<AppState>>,
    Path(hour): Path<usize>,
) -> impl IntoResponse {
    match state.results.lookup(hour) {
        Ok(record) => Ok(Json(TelemetryRecord::from(record))),
        Err(e) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )),
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    use super::*;
    use crate::api::router;
    use crate::config::ScenarioConfig;
    use crate::sim::run_scenario;
    use crate::sim::summary::RunSummary;

    fn make_test_state() -> Arc<AppState> {
        let config = ScenarioConfig::baseline();
        let results = run_scenario(&config).unwrap();
        let summary = RunSummary::from_records(results.all(), config.battery.capacity_kwh);
        Arc::new(AppState {
            config,
            summary,
            results,
        })
    }

    #[tokio::test]
    async fn state_returns_200() {
        let app = router(make_test_state());

        let req = Request::builder()
            .uri("/state")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json.get("config").is_some());
        assert!(json.get("summary").is_some());
        assert_eq!(json["latest_hour"]["hour"], 47);
    }

    #[tokio::test]
    async fn telemetry_returns_all_hours() {
        let app = router(make_test_state());

        let req = Request::builder()
            .uri("/telemetry")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Vec<serde_json::Value> = serde_json::from_slice(&body).unwrap();
        assert_eq!(json.len(), 48);
    }

    #[tokio::test]
    async fn telemetry_range_query() {
        let app = router(make_test_state());

        let req = Request::builder()
            .uri("/telemetry?from=5&to=10")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Vec<serde_json::Value> = serde_json::from_slice(&body).unwrap();
        assert_eq!(json.len(), 6); // hours 5,6,7,8,9,10
        assert_eq!(json[0]["hour"], 5);
        assert_eq!(json[5]["hour"], 10);
    }

    #[tokio::test]
    async fn telemetry_invalid_range_returns_400() {
        let app = router(make_test_state());

        let req = Request::builder()
            .uri("/telemetry?from=10&to=5")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json.get("error").is_some());
    }

    #[tokio::test]
    async fn hour_lookup_returns_record() {
        let app = router(make_test_state());

        let req = Request::builder()
            .uri("/hours/12")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["hour"], 12);
        assert!(json["devices"].is_array());
    }

    #[tokio::test]
    async fn hour_lookup_out_of_range_returns_404() {
        let app = router(make_test_state());

        let req = Request::builder()
            .uri("/hours/48")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json.get("error").is_some());
    }
}
