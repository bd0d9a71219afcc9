//! API DTOs

use crate::application::{DispatchReport, InitiateCall};
use crate::domain::call::CallConnectionProperties;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/calls`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCallRequest {
    pub source: String,
    pub destination: String,
    #[serde(default)]
    pub display_name: String,
}

impl From<CreateCallRequest> for InitiateCall {
    fn from(req: CreateCallRequest) -> Self {
        InitiateCall {
            source: req.source,
            destination: req.destination,
            display_name: req.display_name,
        }
    }
}

/// Returned once the provider accepted the origination
pub type CreateCallResponse = CallConnectionProperties;

/// Acknowledgement of one callback delivery
pub type CallbackBatchResponse = DispatchReport;

/// Generic API response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}
