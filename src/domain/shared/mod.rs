//! Shared kernel - Common types used by the call context and the adapters around it

pub mod error;
pub mod value_objects;

pub use error::{DomainError, Result};
pub use value_objects::*;
