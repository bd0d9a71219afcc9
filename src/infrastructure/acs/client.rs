//! Call Automation REST client

use super::connection_string::ConnectionString;
use super::signing::{http_date, RequestSigner, CONTENT_HASH_HEADER, DATE_HEADER};
use super::wire::{CreateCallRequest, ErrorResponse, PlayRequest, API_VERSION};
use crate::config::ProviderConfig;
use crate::domain::call::{
    CallAutomationProvider, CallConnectionProperties, CallOrigination, PlaybackRequest,
};
use crate::domain::shared::error::{DomainError, Result};
use crate::domain::shared::value_objects::CallConnectionId;
use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;
use uuid::Uuid;

const REPEATABILITY_REQUEST_ID: &str = "Repeatability-Request-ID";
const REPEATABILITY_FIRST_SENT: &str = "Repeatability-First-Sent";

/// Provider client speaking the Call Automation REST API
#[derive(Clone)]
pub struct AcsCallAutomationClient {
    http: reqwest::Client,
    endpoint: Url,
    signer: RequestSigner,
}

impl AcsCallAutomationClient {
    pub fn new(connection_string: &str, timeout: Duration) -> Result<Self> {
        let connection = ConnectionString::parse(connection_string)?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            signer: RequestSigner::new(connection.access_key()),
            endpoint: connection.endpoint,
        })
    }

    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        Self::new(&config.connection_string, config.request_timeout())
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn operation_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| DomainError::Internal(format!("Endpoint '{}' cannot be a base", self.endpoint)))?
            .pop_if_empty()
            .extend(segments);
        url.query_pairs_mut().append_pair("api-version", API_VERSION);
        Ok(url)
    }

    /// Sign and send a JSON POST, returning the successful response
    async fn post<B: Serialize>(
        &self,
        url: Url,
        body: &B,
        repeatable: bool,
    ) -> Result<reqwest::Response> {
        let body = serde_json::to_vec(body)
            .map_err(|e| DomainError::Internal(format!("Failed to encode request: {}", e)))?;

        let host = match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            (None, _) => {
                return Err(DomainError::Internal(format!("Provider URL '{}' has no host", url)))
            }
        };
        let path_and_query = match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        };

        let now = Utc::now();
        let signed = self.signer.sign("POST", &path_and_query, &host, &body, now);

        let mut request = self
            .http
            .post(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(DATE_HEADER, &signed.date)
            .header(CONTENT_HASH_HEADER, &signed.content_hash)
            .header(AUTHORIZATION, &signed.authorization);

        if repeatable {
            request = request
                .header(REPEATABILITY_REQUEST_ID, Uuid::new_v4().to_string())
                .header(REPEATABILITY_FIRST_SENT, http_date(now));
        }

        debug!("POST {}", path_and_query);
        let response = request.body(body).send().await.map_err(|e| {
            if e.is_timeout() {
                DomainError::Provider(format!("Request to provider timed out: {}", e))
            } else {
                DomainError::Provider(format!("Request to provider failed: {}", e))
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorResponse>(&text)
            .ok()
            .and_then(|body| match (body.error.code, body.error.message) {
                (Some(code), Some(message)) => Some(format!("{}: {}", code, message)),
                (None, Some(message)) => Some(message),
                (Some(code), None) => Some(code),
                (None, None) => None,
            })
            .unwrap_or(text);

        warn!("Provider rejected {}: {} {}", path_and_query, status, detail);
        Err(DomainError::Provider(format!("{} {}", status, detail).trim_end().to_string()))
    }
}

#[async_trait]
impl CallAutomationProvider for AcsCallAutomationClient {
    async fn create_call(&self, origination: CallOrigination) -> Result<CallConnectionProperties> {
        let url = self.operation_url(&["calling", "callConnections"])?;
        let body = CreateCallRequest::from(&origination);

        let response = self.post(url, &body, true).await?;
        response.json::<CallConnectionProperties>().await.map_err(|e| {
            DomainError::Provider(format!("Unexpected create call response: {}", e))
        })
    }

    async fn play_to_all(
        &self,
        call_connection_id: &CallConnectionId,
        playback: PlaybackRequest,
    ) -> Result<()> {
        let operation = format!("{}:play", call_connection_id);
        let url = self.operation_url(&["calling", "callConnections", &operation])?;
        let body = PlayRequest::from(&playback);

        self.post(url, &body, true).await?;
        Ok(())
    }
}
