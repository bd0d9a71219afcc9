//! Mapping of domain errors onto HTTP responses

use super::dto::ApiResponse;
use crate::domain::shared::error::DomainError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            DomainError::Validation(_) | DomainError::Decode(_) => StatusCode::BAD_REQUEST,
            DomainError::Provider(_) => StatusCode::BAD_GATEWAY,
            DomainError::Configuration(_) | DomainError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(DomainError::Validation(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("API: {} ({})", self.0, status);
        }
        (status, Json(ApiResponse::<()>::error(self.0.to_string()))).into_response()
    }
}
