//! Provider connection string parsing

use crate::domain::shared::error::{DomainError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use url::Url;

/// Parsed `endpoint=...;accesskey=...` connection string
#[derive(Clone)]
pub struct ConnectionString {
    pub endpoint: Url,
    access_key: Vec<u8>,
}

impl ConnectionString {
    pub fn parse(raw: &str) -> Result<Self> {
        let mut endpoint = None;
        let mut access_key = None;

        for part in raw.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = part.split_once('=').ok_or_else(|| {
                DomainError::Configuration(format!(
                    "Malformed connection string segment '{}'",
                    key_only(part)
                ))
            })?;

            match key.trim().to_ascii_lowercase().as_str() {
                "endpoint" => endpoint = Some(value.trim()),
                "accesskey" => access_key = Some(value.trim()),
                _ => {}
            }
        }

        let endpoint = endpoint.ok_or_else(|| {
            DomainError::Configuration("Connection string has no endpoint".to_string())
        })?;
        let mut endpoint = Url::parse(endpoint).map_err(|e| {
            DomainError::Configuration(format!("Invalid endpoint '{}': {}", endpoint, e))
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(DomainError::Configuration(format!(
                "Endpoint '{}' must be an http(s) URL",
                endpoint
            )));
        }
        if !endpoint.path().ends_with('/') {
            let path = format!("{}/", endpoint.path());
            endpoint.set_path(&path);
        }

        // Base64 padding may contain '='; split_once keeps it in the value.
        let access_key = access_key.ok_or_else(|| {
            DomainError::Configuration("Connection string has no accesskey".to_string())
        })?;
        let access_key = STANDARD.decode(access_key).map_err(|e| {
            DomainError::Configuration(format!("Access key is not valid base64: {}", e))
        })?;
        if access_key.is_empty() {
            return Err(DomainError::Configuration("Access key is empty".to_string()));
        }

        Ok(Self {
            endpoint,
            access_key,
        })
    }

    pub fn access_key(&self) -> &[u8] {
        &self.access_key
    }
}

fn key_only(segment: &str) -> &str {
    segment.split('=').next().unwrap_or(segment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_connection_string() {
        let parsed = ConnectionString::parse(
            "endpoint=https://acs.example.com/;accesskey=c2VjcmV0LWFjY2Vzcy1rZXk=",
        )
        .unwrap();
        assert_eq!(parsed.endpoint.as_str(), "https://acs.example.com/");
        assert_eq!(parsed.access_key(), b"secret-access-key");
    }

    #[test]
    fn test_parse_is_case_insensitive_and_adds_trailing_slash() {
        let parsed =
            ConnectionString::parse("AccessKey=c2VjcmV0;Endpoint=https://acs.example.com;").unwrap();
        assert_eq!(parsed.endpoint.as_str(), "https://acs.example.com/");
        assert_eq!(parsed.access_key(), b"secret");
    }

    #[test]
    fn test_parse_rejects_incomplete() {
        for raw in [
            "",
            "endpoint=https://acs.example.com/",
            "accesskey=c2VjcmV0",
            "endpoint=not a url;accesskey=c2VjcmV0",
            "endpoint=https://acs.example.com/;accesskey=***",
            "endpoint",
        ] {
            let err = ConnectionString::parse(raw).err();
            assert!(
                matches!(err, Some(DomainError::Configuration(_))),
                "expected configuration error for {:?}",
                raw
            );
        }
    }
}
