//! Outbound call initiation use case

use crate::config::ProviderConfig;
use crate::domain::call::{
    callback_url, CallAutomationProvider, CallConnectionProperties, CallOrigination, CallRequest,
};
use crate::domain::shared::error::Result;
use crate::domain::shared::value_objects::CommunicationUserId;
use std::sync::Arc;
use tracing::{error, info};
use url::Url;

/// Unvalidated input for placing a call
#[derive(Debug, Clone)]
pub struct InitiateCall {
    pub source: String,
    pub destination: String,
    pub display_name: String,
}

/// Places outbound calls through the provider
pub struct CallInitiator {
    provider: Arc<dyn CallAutomationProvider>,
    application_id: CommunicationUserId,
    callback_url: Url,
}

impl CallInitiator {
    pub fn new(provider: Arc<dyn CallAutomationProvider>, config: &ProviderConfig) -> Self {
        Self {
            provider,
            application_id: CommunicationUserId::new(config.application_id.trim()),
            callback_url: callback_url(&config.callback_base_url),
        }
    }

    pub fn callback_url(&self) -> &Url {
        &self.callback_url
    }

    /// Validate the request and ask the provider to originate the call.
    ///
    /// Returns once the provider accepted the origination; the call connects
    /// later and is reported through the callback URL.
    pub async fn initiate_call(&self, command: InitiateCall) -> Result<CallConnectionProperties> {
        let request = CallRequest::parse(&command.source, &command.destination, &command.display_name)?;

        info!(
            "Initiating call {} -> {} (callback {})",
            request.source, request.destination, self.callback_url
        );

        let origination =
            CallOrigination::new(self.application_id.clone(), request, self.callback_url.clone());

        match self.provider.create_call(origination).await {
            Ok(properties) => {
                info!(
                    call_connection_id = %properties.call_connection_id,
                    "Call origination accepted by provider"
                );
                Ok(properties)
            }
            Err(e) => {
                error!("Call origination failed: {}", e);
                Err(e)
            }
        }
    }
}
