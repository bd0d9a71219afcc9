//! Azure Communication Services Call Automation adapter
//!
//! Implements [`CallAutomationProvider`](crate::domain::call::CallAutomationProvider)
//! over the provider's REST API with HMAC-signed requests.

pub mod client;
pub mod connection_string;
pub mod signing;
pub mod wire;

pub use client::AcsCallAutomationClient;
pub use connection_string::ConnectionString;
