use crate::api::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

pub async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

/// Ready once token info has been polled; supply figures need it.
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let snapshot = state.store.read().await;
    let balances = snapshot.external_balances();

    if snapshot.token_info().is_none() {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({"status": "loading"})),
        );
    }

    (
        StatusCode::OK,
        Json(json!({
            "status": "ready",
            "balancesComplete": balances.is_complete(),
        })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_returns_ok() {
        let Json(body) = health().await;
        assert_eq!(body["status"], "ok");
    }
}
