//! Port to the call-automation provider

use super::origination::{CallConnectionProperties, CallOrigination};
use super::playback::PlaybackRequest;
use crate::domain::shared::error::Result;
use crate::domain::shared::value_objects::CallConnectionId;
use async_trait::async_trait;

/// Operations this service issues against the provider.
///
/// Implementations hold no per-call state and are shared between requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CallAutomationProvider: Send + Sync {
    /// Ask the provider to originate a call. Returns once the provider accepted
    /// the request, not when the call connects.
    async fn create_call(&self, origination: CallOrigination) -> Result<CallConnectionProperties>;

    /// Start playback on a connected call. Completion arrives later as a
    /// PlayCompleted or PlayFailed event.
    async fn play_to_all(
        &self,
        call_connection_id: &CallConnectionId,
        playback: PlaybackRequest,
    ) -> Result<()>;
}
