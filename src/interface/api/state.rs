//! Shared handler state

use crate::application::{CallInitiator, CallbackDispatcher};
use std::sync::Arc;

/// API state
#[derive(Clone)]
pub struct AppState {
    pub initiator: Arc<CallInitiator>,
    pub dispatcher: Arc<CallbackDispatcher>,
}
