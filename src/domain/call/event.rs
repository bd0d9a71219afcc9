//! Call lifecycle events delivered by the provider
//!
//! The provider posts CloudEvents 1.0 envelopes to the callback URL. Each
//! envelope is decoded on its own into a [`LifecycleEvent`]; an envelope that
//! cannot be decoded never affects its siblings in the same delivery.

use crate::domain::shared::error::{DomainError, Result};
use crate::domain::shared::value_objects::{CallConnectionId, CorrelationId};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const CALL_CONNECTED: &str = "Microsoft.Communication.CallConnected";
pub const PLAY_COMPLETED: &str = "Microsoft.Communication.PlayCompleted";
pub const PLAY_FAILED: &str = "Microsoft.Communication.PlayFailed";

/// Outcome details the provider attaches to operation events
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultInformation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_code: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Lifecycle events this service reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    CallConnected {
        call_connection_id: CallConnectionId,
        correlation_id: Option<CorrelationId>,
    },
    PlayCompleted {
        call_connection_id: Option<CallConnectionId>,
        operation_context: Option<String>,
    },
    PlayFailed {
        call_connection_id: Option<CallConnectionId>,
        operation_context: Option<String>,
        result_information: ResultInformation,
    },
    /// Any event type the provider may add that has no reaction here
    Unrecognized { kind: String },
}

impl LifecycleEvent {
    pub fn kind(&self) -> &str {
        match self {
            LifecycleEvent::CallConnected { .. } => "CallConnected",
            LifecycleEvent::PlayCompleted { .. } => "PlayCompleted",
            LifecycleEvent::PlayFailed { .. } => "PlayFailed",
            LifecycleEvent::Unrecognized { kind } => kind,
        }
    }
}

/// CloudEvents envelope wrapping one lifecycle event
///
/// Only `id`, `type` and `data` are read; other attributes such as `time` or
/// `source` are accepted in any shape.
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackEnvelope {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub data: Value,
}

/// A decoded event together with the envelope id it arrived in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedEvent {
    pub envelope_id: Option<String>,
    pub event: LifecycleEvent,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CallConnectedData {
    call_connection_id: String,
    #[serde(default)]
    correlation_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayOutcomeData {
    #[serde(default)]
    call_connection_id: Option<String>,
    #[serde(default)]
    operation_context: Option<String>,
    #[serde(default)]
    result_information: Option<ResultInformation>,
}

impl CallbackEnvelope {
    /// Decode a raw JSON envelope
    pub fn decode(raw: Value) -> Result<DecodedEvent> {
        let envelope: CallbackEnvelope = serde_json::from_value(raw)
            .map_err(|e| DomainError::Decode(format!("Invalid event envelope: {}", e)))?;
        let envelope_id = envelope.id.clone();
        let event = envelope.into_event()?;
        Ok(DecodedEvent { envelope_id, event })
    }

    fn into_event(self) -> Result<LifecycleEvent> {
        let event_type = self.event_type.trim();
        if event_type.is_empty() {
            return Err(DomainError::Decode("Event envelope has an empty type".to_string()));
        }

        match event_type {
            CALL_CONNECTED => {
                let data: CallConnectedData = decode_data(event_type, self.data)?;
                if data.call_connection_id.trim().is_empty() {
                    return Err(DomainError::Decode(format!(
                        "{} event has an empty callConnectionId",
                        event_type
                    )));
                }
                Ok(LifecycleEvent::CallConnected {
                    call_connection_id: CallConnectionId::new(data.call_connection_id),
                    correlation_id: data.correlation_id.map(CorrelationId::new),
                })
            }
            PLAY_COMPLETED => {
                let data: PlayOutcomeData = decode_data(event_type, self.data)?;
                Ok(LifecycleEvent::PlayCompleted {
                    call_connection_id: data.call_connection_id.map(CallConnectionId::new),
                    operation_context: data.operation_context,
                })
            }
            PLAY_FAILED => {
                let data: PlayOutcomeData = decode_data(event_type, self.data)?;
                Ok(LifecycleEvent::PlayFailed {
                    call_connection_id: data.call_connection_id.map(CallConnectionId::new),
                    operation_context: data.operation_context,
                    result_information: data.result_information.unwrap_or_default(),
                })
            }
            other => Ok(LifecycleEvent::Unrecognized {
                kind: other.to_string(),
            }),
        }
    }
}

fn decode_data<T: DeserializeOwned>(event_type: &str, data: Value) -> Result<T> {
    serde_json::from_value(data)
        .map_err(|e| DomainError::Decode(format!("Invalid {} payload: {}", event_type, e)))
}
