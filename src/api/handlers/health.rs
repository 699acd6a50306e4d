//! Health check handlers.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::state::AppState;
use crate::domain::{ApiResponse, HealthResponse, ReadyComponents, ReadyResponse};
use crate::error::ErrorCode;

/// Liveness probe - always returns 200 if the service is running.
pub async fn health() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::success(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// Readiness probe - checks storage and the entropy source.
pub async fn ready(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<ReadyResponse>>) {
    let storage_ok = state.storage.health_check().await.is_ok();
    let entropy_ok = state.random.random_bytes(1).is_ok();
    let ready = storage_ok && entropy_ok;

    let body = ReadyResponse {
        ready,
        components: ReadyComponents {
            storage: storage_ok,
            entropy: entropy_ok,
        },
    };

    if ready {
        return (StatusCode::OK, Json(ApiResponse::success(body)));
    }

    let response = ApiResponse {
        code: ErrorCode::SERVICE_UNAVAILABLE.as_i32(),
        message: "service unavailable".to_string(),
        data: Some(body),
    };
    (StatusCode::SERVICE_UNAVAILABLE, Json(response))
}

/// Prometheus metrics endpoint.
pub async fn metrics(State(state): State<AppState>) -> String {
    let mut output = String::new();

    output.push_str("# HELP random_worker_up Whether the service is up\n");
    output.push_str("# TYPE random_worker_up gauge\n");
    output.push_str("random_worker_up 1\n");

    if let Some(handle) = &state.metrics {
        output.push_str(&handle.render());
    }

    output
}
