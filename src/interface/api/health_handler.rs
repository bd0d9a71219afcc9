//! Liveness endpoint

use super::dto::ApiResponse;
use axum::Json;

/// Health check
pub async fn health_check() -> Json<ApiResponse<&'static str>> {
    Json(ApiResponse::success("OK"))
}
