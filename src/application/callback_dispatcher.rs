//! Callback dispatch use case
//!
//! Decodes each envelope of a provider delivery and reacts to it:
//!
//! | Event         | Reaction                                    |
//! |---------------|---------------------------------------------|
//! | CallConnected | play the welcome message on that connection |
//! | PlayCompleted | record success                              |
//! | PlayFailed    | record failure with the provider's message  |
//! | anything else | record receipt                              |
//!
//! Nothing is remembered between events. A failure on one envelope is
//! recorded and the rest of the batch is still processed.

use crate::config::ProviderConfig;
use crate::domain::call::{
    CallAutomationProvider, CallbackEnvelope, LifecycleEvent, PlaybackRequest,
    WELCOME_MESSAGE_CONTEXT,
};
use crate::domain::shared::value_objects::CallConnectionId;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use url::Url;

/// What happened to one envelope of a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum DispatchOutcome {
    /// A playback command was accepted for the connection
    #[serde(rename_all = "camelCase")]
    PlaybackStarted { call_connection_id: CallConnectionId },
    /// The provider rejected the playback command
    #[serde(rename_all = "camelCase")]
    CommandFailed {
        call_connection_id: CallConnectionId,
        error: String,
    },
    #[serde(rename_all = "camelCase")]
    PlaybackCompleted {
        call_connection_id: Option<CallConnectionId>,
        operation_context: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    PlaybackFailed {
        call_connection_id: Option<CallConnectionId>,
        operation_context: Option<String>,
        message: String,
    },
    /// Event kind with no reaction
    Ignored { kind: String },
    DecodeFailed { error: String },
}

impl DispatchOutcome {
    /// Stable label used for metrics
    pub fn label(&self) -> &'static str {
        match self {
            DispatchOutcome::PlaybackStarted { .. } => "playback_started",
            DispatchOutcome::CommandFailed { .. } => "command_failed",
            DispatchOutcome::PlaybackCompleted { .. } => "playback_completed",
            DispatchOutcome::PlaybackFailed { .. } => "playback_failed",
            DispatchOutcome::Ignored { .. } => "ignored",
            DispatchOutcome::DecodeFailed { .. } => "decode_failed",
        }
    }
}

/// Outcome of one envelope, attributed to its position and envelope id
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchRecord {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub envelope_id: Option<String>,
    #[serde(flatten)]
    pub outcome: DispatchOutcome,
}

/// Ordered outcomes of one delivery
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DispatchReport {
    pub received: usize,
    pub outcomes: Vec<DispatchRecord>,
}

impl DispatchReport {
    pub fn count(&self, label: &str) -> usize {
        self.outcomes
            .iter()
            .filter(|record| record.outcome.label() == label)
            .count()
    }
}

/// Reacts to lifecycle events pushed by the provider
pub struct CallbackDispatcher {
    provider: Arc<dyn CallAutomationProvider>,
    audio_file_uri: Url,
}

impl CallbackDispatcher {
    pub fn new(provider: Arc<dyn CallAutomationProvider>, config: &ProviderConfig) -> Self {
        Self {
            provider,
            audio_file_uri: config.audio_file_uri.clone(),
        }
    }

    /// Process a delivery in order. Never fails as a whole.
    pub async fn handle_callback_batch(&self, envelopes: Vec<Value>) -> DispatchReport {
        let received = envelopes.len();
        debug!("Received callback batch with {} event(s)", received);

        let mut outcomes = Vec::with_capacity(received);
        for (index, raw) in envelopes.into_iter().enumerate() {
            outcomes.push(self.dispatch(index, raw).await);
        }

        DispatchReport { received, outcomes }
    }

    async fn dispatch(&self, index: usize, raw: Value) -> DispatchRecord {
        // Undecodable envelopes still report their id
        let raw_id = raw.get("id").and_then(Value::as_str).map(str::to_string);

        let decoded = match CallbackEnvelope::decode(raw) {
            Ok(decoded) => decoded,
            Err(e) => {
                warn!("Skipping callback event #{}: {}", index, e);
                return DispatchRecord {
                    index,
                    envelope_id: raw_id,
                    outcome: DispatchOutcome::DecodeFailed {
                        error: e.to_string(),
                    },
                };
            }
        };

        info!("Received {} (event #{})", decoded.event.kind(), index);
        let outcome = self.react(decoded.event).await;

        DispatchRecord {
            index,
            envelope_id: decoded.envelope_id,
            outcome,
        }
    }

    async fn react(&self, event: LifecycleEvent) -> DispatchOutcome {
        match event {
            LifecycleEvent::CallConnected {
                call_connection_id,
                correlation_id,
            } => {
                info!(
                    "Call connected: {} | {}",
                    call_connection_id,
                    correlation_id.as_ref().map(|c| c.as_str()).unwrap_or("-")
                );
                self.play_welcome_message(call_connection_id).await
            }
            LifecycleEvent::PlayCompleted {
                call_connection_id,
                operation_context,
            } => {
                info!(
                    "Play completed! The OperationContext is {}.",
                    operation_context.as_deref().unwrap_or("<none>")
                );
                if operation_context.as_deref() != Some(WELCOME_MESSAGE_CONTEXT) {
                    debug!("PlayCompleted carries an unexpected operation context");
                }
                DispatchOutcome::PlaybackCompleted {
                    call_connection_id,
                    operation_context,
                }
            }
            LifecycleEvent::PlayFailed {
                call_connection_id,
                operation_context,
                result_information,
            } => {
                let message = result_information
                    .message
                    .unwrap_or_else(|| "no reason given".to_string());
                error!(
                    code = ?result_information.code,
                    sub_code = ?result_information.sub_code,
                    "Play failed: {}",
                    message
                );
                DispatchOutcome::PlaybackFailed {
                    call_connection_id,
                    operation_context,
                    message,
                }
            }
            LifecycleEvent::Unrecognized { kind } => {
                info!("No action for event type {}", kind);
                DispatchOutcome::Ignored { kind }
            }
        }
    }

    async fn play_welcome_message(&self, call_connection_id: CallConnectionId) -> DispatchOutcome {
        let playback = PlaybackRequest::welcome_message(self.audio_file_uri.clone());

        match self.provider.play_to_all(&call_connection_id, playback).await {
            Ok(()) => {
                info!("Playback requested on call {}", call_connection_id);
                DispatchOutcome::PlaybackStarted { call_connection_id }
            }
            Err(e) => {
                error!("Failed to start playback on call {}: {}", call_connection_id, e);
                DispatchOutcome::CommandFailed {
                    call_connection_id,
                    error: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::call::event::{CALL_CONNECTED, PLAY_COMPLETED, PLAY_FAILED};
    use crate::domain::call::MockCallAutomationProvider;
    use crate::domain::shared::error::DomainError;
    use mockall::predicate::eq;
    use serde_json::json;

    fn provider_config() -> ProviderConfig {
        ProviderConfig {
            connection_string: "endpoint=https://acs.example.com/;accesskey=c2VjcmV0".to_string(),
            application_id: "8:acs:app-identity".to_string(),
            callback_base_url: Url::parse("https://tunnel.example.com/").unwrap(),
            audio_file_uri: Url::parse("https://media.example.com/welcome.wav").unwrap(),
            request_timeout_secs: 10,
        }
    }

    fn dispatcher(provider: MockCallAutomationProvider) -> CallbackDispatcher {
        CallbackDispatcher::new(Arc::new(provider), &provider_config())
    }

    fn call_connected(call_id: &str) -> Value {
        json!({
            "id": format!("evt-{}", call_id),
            "type": CALL_CONNECTED,
            "data": { "callConnectionId": call_id, "correlationId": "corr-1" }
        })
    }

    fn play_completed(call_id: &str) -> Value {
        json!({
            "type": PLAY_COMPLETED,
            "data": { "callConnectionId": call_id, "operationContext": "WelcomeMessage" }
        })
    }

    fn play_failed(call_id: &str, message: &str) -> Value {
        json!({
            "type": PLAY_FAILED,
            "data": {
                "callConnectionId": call_id,
                "operationContext": "WelcomeMessage",
                "resultInformation": { "code": 400, "subCode": 8535, "message": message }
            }
        })
    }

    #[tokio::test]
    async fn test_each_call_connected_issues_one_playback() {
        let mut provider = MockCallAutomationProvider::new();
        for call_id in ["a", "b", "c"] {
            provider
                .expect_play_to_all()
                .with(
                    eq(CallConnectionId::new(call_id)),
                    eq(PlaybackRequest::welcome_message(
                        Url::parse("https://media.example.com/welcome.wav").unwrap(),
                    )),
                )
                .times(1)
                .returning(|_, _| Ok(()));
        }
        provider.expect_create_call().never();

        let report = dispatcher(provider)
            .handle_callback_batch(vec![
                call_connected("a"),
                call_connected("b"),
                call_connected("c"),
            ])
            .await;

        assert_eq!(report.received, 3);
        assert_eq!(report.count("playback_started"), 3);
        assert_eq!(report.outcomes[1].envelope_id.as_deref(), Some("evt-b"));
    }

    #[tokio::test]
    async fn test_connected_then_failed_plays_once() {
        let mut provider = MockCallAutomationProvider::new();
        provider
            .expect_play_to_all()
            .with(eq(CallConnectionId::new("abc")), mockall::predicate::always())
            .times(1)
            .returning(|_, _| Ok(()));

        let report = dispatcher(provider)
            .handle_callback_batch(vec![
                call_connected("abc"),
                play_failed("abc", "src unreachable"),
            ])
            .await;

        assert_eq!(
            report.outcomes[0].outcome,
            DispatchOutcome::PlaybackStarted {
                call_connection_id: CallConnectionId::new("abc")
            }
        );
        assert_eq!(
            report.outcomes[1].outcome,
            DispatchOutcome::PlaybackFailed {
                call_connection_id: Some(CallConnectionId::new("abc")),
                operation_context: Some("WelcomeMessage".to_string()),
                message: "src unreachable".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_malformed_envelope_does_not_block_siblings() {
        let mut provider = MockCallAutomationProvider::new();
        provider
            .expect_play_to_all()
            .times(2)
            .returning(|_, _| Ok(()));

        let report = dispatcher(provider)
            .handle_callback_batch(vec![
                call_connected("a"),
                json!({ "id": "evt-bad", "type": CALL_CONNECTED, "data": { "correlationId": "x" } }),
                play_completed("a"),
                call_connected("b"),
            ])
            .await;

        assert_eq!(report.received, 4);
        assert_eq!(report.count("decode_failed"), 1);
        assert_eq!(report.count("playback_started"), 2);
        assert_eq!(report.count("playback_completed"), 1);
        assert!(matches!(
            report.outcomes[1].outcome,
            DispatchOutcome::DecodeFailed { .. }
        ));
        assert_eq!(report.outcomes[1].envelope_id.as_deref(), Some("evt-bad"));
    }

    #[tokio::test]
    async fn test_call_connected_with_non_rfc3339_time_still_plays() {
        let mut provider = MockCallAutomationProvider::new();
        provider
            .expect_play_to_all()
            .with(eq(CallConnectionId::new("abc")), mockall::predicate::always())
            .times(1)
            .returning(|_, _| Ok(()));

        let report = dispatcher(provider)
            .handle_callback_batch(vec![json!({
                "id": "evt-1",
                "type": CALL_CONNECTED,
                "time": "Fri, 01 Mar 2024 10:00:00 GMT",
                "data": { "callConnectionId": "abc" }
            })])
            .await;

        assert_eq!(report.count("playback_started"), 1);
        assert_eq!(report.count("decode_failed"), 0);
    }

    #[tokio::test]
    async fn test_playback_command_failure_continues_batch() {
        let mut provider = MockCallAutomationProvider::new();
        provider
            .expect_play_to_all()
            .with(eq(CallConnectionId::new("gone")), mockall::predicate::always())
            .times(1)
            .returning(|_, _| Err(DomainError::Provider("404 Not Found: call not found".to_string())));
        provider
            .expect_play_to_all()
            .with(eq(CallConnectionId::new("live")), mockall::predicate::always())
            .times(1)
            .returning(|_, _| Ok(()));

        let report = dispatcher(provider)
            .handle_callback_batch(vec![call_connected("gone"), call_connected("live")])
            .await;

        assert_eq!(
            report.outcomes[0].outcome,
            DispatchOutcome::CommandFailed {
                call_connection_id: CallConnectionId::new("gone"),
                error: "Provider error: 404 Not Found: call not found".to_string(),
            }
        );
        assert_eq!(report.count("playback_started"), 1);
    }

    #[tokio::test]
    async fn test_play_outcomes_never_call_provider() {
        let mut provider = MockCallAutomationProvider::new();
        provider.expect_play_to_all().never();
        provider.expect_create_call().never();

        let report = dispatcher(provider)
            .handle_callback_batch(vec![
                play_completed("abc"),
                play_completed("abc"),
                play_failed("abc", "src unreachable"),
            ])
            .await;

        // Same event twice yields two independent records.
        assert_eq!(report.count("playback_completed"), 2);
        assert_eq!(report.outcomes[0].outcome, report.outcomes[1].outcome);
        assert_eq!(report.count("playback_failed"), 1);
    }

    #[tokio::test]
    async fn test_unrecognized_and_empty_batches() {
        let mut provider = MockCallAutomationProvider::new();
        provider.expect_play_to_all().never();
        let dispatcher = dispatcher(provider);

        let report = dispatcher
            .handle_callback_batch(vec![json!({
                "type": "Microsoft.Communication.ParticipantsUpdated",
                "data": { "callConnectionId": "abc" }
            })])
            .await;
        assert_eq!(
            report.outcomes[0].outcome,
            DispatchOutcome::Ignored {
                kind: "Microsoft.Communication.ParticipantsUpdated".to_string()
            }
        );

        let empty = dispatcher.handle_callback_batch(Vec::new()).await;
        assert_eq!(empty, DispatchReport::default());
    }

    #[test]
    fn test_record_serialization() {
        let record = DispatchRecord {
            index: 0,
            envelope_id: Some("evt-1".to_string()),
            outcome: DispatchOutcome::PlaybackStarted {
                call_connection_id: CallConnectionId::new("abc"),
            },
        };

        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "index": 0,
                "envelopeId": "evt-1",
                "outcome": "playbackStarted",
                "callConnectionId": "abc"
            })
        );
    }
}
