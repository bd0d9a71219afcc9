//! Domain errors

use thiserror::Error;

/// Domain result type
pub type Result<T> = std::result::Result<T, DomainError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Malformed request input, e.g. a phone number the provider would reject
    #[error("Validation error: {0}")]
    Validation(String),

    /// The call-automation provider rejected or failed a request
    #[error("Provider error: {0}")]
    Provider(String),

    /// A callback envelope could not be decoded into a lifecycle event
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Stable label used for metrics and log fields
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::Validation(_) => "validation",
            DomainError::Provider(_) => "provider",
            DomainError::Decode(_) => "decode",
            DomainError::Configuration(_) => "configuration",
            DomainError::Internal(_) => "internal",
        }
    }
}
