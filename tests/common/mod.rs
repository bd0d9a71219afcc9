//! Shared fixtures for API integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use metrics_exporter_prometheus::PrometheusBuilder;
use playaudio::application::{CallInitiator, CallbackDispatcher};
use playaudio::config::ProviderConfig;
use playaudio::domain::call::{
    CallAutomationProvider, CallConnectionProperties, CallOrigination, PlaybackRequest,
};
use playaudio::domain::shared::value_objects::{CallConnectionId, CorrelationId};
use playaudio::interface::api::{build_router, AppState};
use playaudio::{DomainError, Result};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tower::ServiceExt; // For `oneshot`
use url::Url;

/// Provider double that records every command it receives
#[derive(Default)]
pub struct RecordingProvider {
    pub originations: Mutex<Vec<CallOrigination>>,
    pub playbacks: Mutex<Vec<(CallConnectionId, PlaybackRequest)>>,
    pub reject_create_call: Option<String>,
    pub reject_playback_for: Option<String>,
}

impl RecordingProvider {
    pub fn originations(&self) -> Vec<CallOrigination> {
        self.originations.lock().unwrap().clone()
    }

    pub fn playbacks(&self) -> Vec<(CallConnectionId, PlaybackRequest)> {
        self.playbacks.lock().unwrap().clone()
    }
}

#[async_trait]
impl CallAutomationProvider for RecordingProvider {
    async fn create_call(&self, origination: CallOrigination) -> Result<CallConnectionProperties> {
        self.originations.lock().unwrap().push(origination);

        if let Some(reason) = &self.reject_create_call {
            return Err(DomainError::Provider(reason.clone()));
        }

        Ok(CallConnectionProperties {
            call_connection_id: CallConnectionId::new("call-123"),
            correlation_id: Some(CorrelationId::new("corr-456")),
        })
    }

    async fn play_to_all(
        &self,
        call_connection_id: &CallConnectionId,
        playback: PlaybackRequest,
    ) -> Result<()> {
        self.playbacks
            .lock()
            .unwrap()
            .push((call_connection_id.clone(), playback));

        if self.reject_playback_for.as_deref() == Some(call_connection_id.as_str()) {
            return Err(DomainError::Provider("8500 Call is not established".to_string()));
        }
        Ok(())
    }
}

pub fn provider_config() -> ProviderConfig {
    ProviderConfig {
        connection_string: "endpoint=https://acs.example.com/;accesskey=c2VjcmV0".to_string(),
        application_id: "8:acs:app-identity".to_string(),
        callback_base_url: Url::parse("https://tunnel.example.com/").unwrap(),
        audio_file_uri: Url::parse("https://media.example.com/welcome.wav").unwrap(),
        request_timeout_secs: 10,
    }
}

pub fn setup_api_test(provider: Arc<RecordingProvider>) -> Router {
    let config = provider_config();
    let state = AppState {
        initiator: Arc::new(CallInitiator::new(provider.clone(), &config)),
        dispatcher: Arc::new(CallbackDispatcher::new(provider, &config)),
    };

    // Not installed globally, so every test gets its own handle
    let prometheus_handle = PrometheusBuilder::new().build_recorder().handle();
    build_router(state, prometheus_handle)
}

pub async fn post_json(app: Router, uri: &str, body: String) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);

    (status, json)
}
