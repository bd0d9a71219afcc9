//! Call bounded context - outbound calls, their lifecycle events and the
//! provider port

pub mod event;
pub mod origination;
pub mod playback;
pub mod provider;

pub use event::{CallbackEnvelope, DecodedEvent, LifecycleEvent, ResultInformation};
pub use origination::{callback_url, CallConnectionProperties, CallOrigination, CallRequest};
pub use playback::{PlaybackRequest, WELCOME_MESSAGE_CONTEXT};
pub use provider::CallAutomationProvider;

#[cfg(test)]
pub use provider::MockCallAutomationProvider;
