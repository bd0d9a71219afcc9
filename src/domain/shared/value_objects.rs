//! Shared value objects used across the call context

use super::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Phone number in E.164 form, as required by the provider
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    const MIN_DIGITS: usize = 7;
    const MAX_DIGITS: usize = 15;

    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let value = raw.trim();

        let digits = value.strip_prefix('+').ok_or_else(|| {
            DomainError::Validation(format!(
                "Phone number '{}' must start with '+' and a country code",
                value
            ))
        })?;

        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::Validation(format!(
                "Phone number '{}' may only contain digits after '+'",
                value
            )));
        }

        if !(Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&digits.len()) {
            return Err(DomainError::Validation(format!(
                "Phone number '{}' must have between {} and {} digits",
                value,
                Self::MIN_DIGITS,
                Self::MAX_DIGITS
            )));
        }

        if digits.starts_with('0') {
            return Err(DomainError::Validation(format!(
                "Phone number '{}' has an invalid country code",
                value
            )));
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PhoneNumber> for String {
    fn from(number: PhoneNumber) -> Self {
        number.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Provider-side identifier of one live call leg
    CallConnectionId
);

string_id!(
    /// Provider correlation identifier shared by all events of a call
    CorrelationId
);

string_id!(
    /// Communication identity the calls are placed on behalf of
    CommunicationUserId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_number_parse() {
        let number = PhoneNumber::parse("+15550001234").unwrap();
        assert_eq!(number.as_str(), "+15550001234");

        let trimmed = PhoneNumber::parse("  +442071838750 ").unwrap();
        assert_eq!(trimmed.to_string(), "+442071838750");
    }

    #[test]
    fn test_phone_number_rejects_malformed() {
        for raw in [
            "",
            "15550001234",
            "+1555-000-1234",
            "+123",
            "+1234567890123456",
            "+05550001234",
            "sip:alice@example.com",
        ] {
            let err = PhoneNumber::parse(raw).unwrap_err();
            assert!(
                matches!(err, DomainError::Validation(_)),
                "expected validation error for {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_phone_number_serde() {
        let number: PhoneNumber = serde_json::from_str("\"+15559998765\"").unwrap();
        assert_eq!(number.as_str(), "+15559998765");
        assert!(serde_json::from_str::<PhoneNumber>("\"5559998765\"").is_err());
    }

    #[test]
    fn test_call_connection_id_display() {
        let id = CallConnectionId::new("abc");
        assert_eq!(id.to_string(), "abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
    }
}
