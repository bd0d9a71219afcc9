//! Outbound call origination

use crate::domain::shared::error::Result;
use crate::domain::shared::value_objects::{
    CallConnectionId, CommunicationUserId, CorrelationId, PhoneNumber,
};
use serde::{Deserialize, Serialize};
use url::Url;

/// Path the provider posts lifecycle events to
pub const CALLBACK_PATH: &str = "api/callbacks";

/// Validated request to place one outbound call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRequest {
    pub source: PhoneNumber,
    pub destination: PhoneNumber,
    pub display_name: Option<String>,
}

impl CallRequest {
    pub fn parse(source: &str, destination: &str, display_name: &str) -> Result<Self> {
        let source = PhoneNumber::parse(source)?;
        let destination = PhoneNumber::parse(destination)?;
        let display_name = match display_name.trim() {
            "" => None,
            name => Some(name.to_string()),
        };

        Ok(Self {
            source,
            destination,
            display_name,
        })
    }
}

/// Descriptor handed to the provider to originate a call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallOrigination {
    pub application_id: CommunicationUserId,
    pub caller_id: PhoneNumber,
    pub display_name: Option<String>,
    pub target: PhoneNumber,
    pub callback_url: Url,
}

impl CallOrigination {
    pub fn new(application_id: CommunicationUserId, request: CallRequest, callback_url: Url) -> Self {
        Self {
            application_id,
            caller_id: request.source,
            display_name: request.display_name,
            target: request.destination,
            callback_url,
        }
    }
}

/// What the provider returns once it accepted an origination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallConnectionProperties {
    pub call_connection_id: CallConnectionId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<CorrelationId>,
}

/// Join the externally reachable base URL with the callback path.
///
/// Exactly one `/` separates the two whether or not the base has a trailing
/// slash.
pub fn callback_url(base: &Url) -> Url {
    let mut url = base.clone();
    let path = format!("{}/{}", base.path().trim_end_matches('/'), CALLBACK_PATH);
    url.set_path(&path);
    url.set_query(None);
    url.set_fragment(None);
    url
}
