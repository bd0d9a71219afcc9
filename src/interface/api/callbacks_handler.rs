//! Provider callback API handler

use super::dto::{ApiResponse, CallbackBatchResponse};
use super::error::ApiError;
use super::metrics_handler::record_dispatch_outcome;
use super::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;
use tracing::info;

/// Receive one delivery of lifecycle events.
///
/// Individual events that fail to decode or dispatch are reported in the
/// response body; the delivery as a whole is still acknowledged.
pub async fn handle_callbacks(
    State(state): State<AppState>,
    payload: Result<Json<Vec<Value>>, JsonRejection>,
) -> Result<Json<ApiResponse<CallbackBatchResponse>>, ApiError> {
    let Json(events) = payload?;

    let report = state.dispatcher.handle_callback_batch(events).await;
    for record in &report.outcomes {
        record_dispatch_outcome(&record.outcome);
    }

    info!(
        "API: Processed {} callback event(s), {} skipped",
        report.received,
        report.count("decode_failed")
    );

    Ok(Json(ApiResponse::success(report)))
}
