//! Infrastructure layer - Technical capabilities
//!
//! This layer provides:
//! - The call-automation provider REST client
//! - Request signing against the provider

pub mod acs;
