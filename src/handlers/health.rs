use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

pub async fn health_check() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// Ready once the database answers a probe query. Deployments without a
/// pool (in-memory backends) are always ready.
pub async fn readiness_check(State(state): State<AppState>) -> StatusCode {
    match &state.db_pool {
        Some(pool) => match pool.ping().await {
            Ok(()) => StatusCode::OK,
            Err(e) => {
                tracing::warn!("Readiness probe failed: {}", e);
                StatusCode::SERVICE_UNAVAILABLE
            }
        },
        None => StatusCode::OK,
    }
}
