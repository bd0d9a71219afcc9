//! Call initiation API handler

use super::dto::{ApiResponse, CreateCallRequest, CreateCallResponse};
use super::error::ApiError;
use super::metrics_handler::record_call_initiated;
use super::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use tracing::info;

/// Place an outbound call.
///
/// Answers 202 once the provider accepted the origination; the call itself
/// connects later and is reported to `/api/callbacks`.
pub async fn create_call(
    State(state): State<AppState>,
    payload: Result<Json<CreateCallRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<CreateCallResponse>>), ApiError> {
    let Json(req) = payload.map_err(|rejection| {
        record_call_initiated("validation");
        ApiError::from(rejection)
    })?;

    info!("API: Creating call {} -> {}", req.source, req.destination);

    match state.initiator.initiate_call(req.into()).await {
        Ok(properties) => {
            record_call_initiated("accepted");
            info!(
                "API: Call accepted (callConnectionId: {})",
                properties.call_connection_id
            );
            Ok((StatusCode::ACCEPTED, Json(ApiResponse::success(properties))))
        }
        Err(e) => {
            record_call_initiated(e.kind());
            Err(e.into())
        }
    }
}
