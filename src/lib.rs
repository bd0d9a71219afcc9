//! PlayAudio - places outbound calls through a call-automation provider and
//! plays a welcome message once they connect
//!
//! Layered the same way as the rest of the codebase: domain types and the
//! provider port, application use cases, the provider REST adapter, and the
//! HTTP interface.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interface;

// Re-export commonly used types
pub use domain::shared::error::DomainError;
pub use domain::shared::error::Result;
