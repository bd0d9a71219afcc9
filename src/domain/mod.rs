//! Domain layer - Core call-automation rules
//!
//! This layer contains:
//! - Value Objects: phone numbers and provider identifiers
//! - Domain Events: lifecycle events pushed by the provider
//! - Ports: the call-automation provider interface

pub mod call;
pub mod shared;

// Re-export commonly used types
pub use shared::{DomainError, Result};
