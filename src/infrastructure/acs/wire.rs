//! REST payloads of the provider's Call Automation API (2023-10-15)

use crate::domain::call::{CallOrigination, PlaybackRequest};
use serde::{Deserialize, Serialize};

pub const API_VERSION: &str = "2023-10-15";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCallRequest<'a> {
    pub targets: Vec<CommunicationIdentifier<'a>>,
    pub source_caller_id_number: PhoneNumberIdentifier<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_display_name: Option<&'a str>,
    pub source: CommunicationUserIdentifier<'a>,
    pub callback_uri: &'a str,
}

impl<'a> From<&'a CallOrigination> for CreateCallRequest<'a> {
    fn from(origination: &'a CallOrigination) -> Self {
        Self {
            targets: vec![CommunicationIdentifier::phone_number(
                origination.target.as_str(),
            )],
            source_caller_id_number: PhoneNumberIdentifier {
                value: origination.caller_id.as_str(),
            },
            source_display_name: origination.display_name.as_deref(),
            source: CommunicationUserIdentifier {
                id: origination.application_id.as_str(),
            },
            callback_uri: origination.callback_url.as_str(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunicationIdentifier<'a> {
    pub kind: &'static str,
    pub phone_number: PhoneNumberIdentifier<'a>,
}

impl<'a> CommunicationIdentifier<'a> {
    pub fn phone_number(value: &'a str) -> Self {
        Self {
            kind: "phoneNumber",
            phone_number: PhoneNumberIdentifier { value },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PhoneNumberIdentifier<'a> {
    pub value: &'a str,
}

#[derive(Debug, Serialize)]
pub struct CommunicationUserIdentifier<'a> {
    pub id: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayRequest<'a> {
    pub play_sources: Vec<PlaySource<'a>>,
    pub play_options: PlayOptions,
    pub operation_context: &'a str,
}

impl<'a> From<&'a PlaybackRequest> for PlayRequest<'a> {
    fn from(playback: &'a PlaybackRequest) -> Self {
        Self {
            play_sources: vec![PlaySource {
                kind: "file",
                file: FileSource {
                    uri: playback.audio_source_uri.as_str(),
                },
            }],
            play_options: PlayOptions { r#loop: false },
            operation_context: &playback.operation_context,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PlaySource<'a> {
    pub kind: &'static str,
    pub file: FileSource<'a>,
}

#[derive(Debug, Serialize)]
pub struct FileSource<'a> {
    pub uri: &'a str,
}

#[derive(Debug, Serialize)]
pub struct PlayOptions {
    pub r#loop: bool,
}

/// Error body returned on non-2xx responses
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
