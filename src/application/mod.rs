//! Application layer - Use cases and application services
//!
//! This layer orchestrates domain objects to fulfill use cases:
//! - placing an outbound call
//! - reacting to the lifecycle events the provider pushes back

pub mod call_initiator;
pub mod callback_dispatcher;

pub use call_initiator::{CallInitiator, InitiateCall};
pub use callback_dispatcher::{CallbackDispatcher, DispatchOutcome, DispatchRecord, DispatchReport};
