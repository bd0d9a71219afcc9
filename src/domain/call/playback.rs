//! Media playback commands

use serde::{Deserialize, Serialize};
use url::Url;

/// Operation context echoed back in PlayCompleted / PlayFailed
pub const WELCOME_MESSAGE_CONTEXT: &str = "WelcomeMessage";

/// Play an audio file to every participant of a call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackRequest {
    pub audio_source_uri: Url,
    pub operation_context: String,
}

impl PlaybackRequest {
    pub fn welcome_message(audio_source_uri: Url) -> Self {
        Self {
            audio_source_uri,
            operation_context: WELCOME_MESSAGE_CONTEXT.to_string(),
        }
    }
}
