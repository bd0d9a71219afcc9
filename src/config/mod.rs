//! Configuration management
//!
//! Settings are read once at startup from built-in defaults, an optional
//! config file and `PLAYAUDIO__*` environment variables, in that order. The
//! resulting [`Config`] is passed explicitly to the components that need it.

use crate::domain::shared::error::{DomainError, Result};
use crate::infrastructure::acs::ConnectionString;
use ::config::builder::DefaultState;
use ::config::{ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

const ENV_PREFIX: &str = "PLAYAUDIO";
const ENV_CONFIG_FILE: &str = "PLAYAUDIO_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "config/default";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub provider: ProviderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Call-automation provider settings
#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// `endpoint=https://<resource>.communication.azure.com/;accesskey=<base64>`
    pub connection_string: String,
    /// Communication identity the calls are placed on behalf of
    pub application_id: String,
    /// Externally reachable base URL; `/api/callbacks` is appended to it
    pub callback_base_url: Url,
    /// Audio file played once a call connects
    pub audio_file_uri: Url,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl ProviderConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

// The connection string carries the access key.
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("connection_string", &"<redacted>")
            .field("application_id", &self.application_id)
            .field("callback_base_url", &self.callback_base_url.as_str())
            .field("audio_file_uri", &self.audio_file_uri.as_str())
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl Config {
    /// Load from the default file, the file named by `PLAYAUDIO_CONFIG` and
    /// the environment
    pub fn load() -> Result<Self> {
        let mut builder = ::config::Config::builder()
            .add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false));

        if let Ok(path) = std::env::var(ENV_CONFIG_FILE) {
            builder = builder.add_source(File::with_name(&path).required(true));
        }

        let builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        Self::build(builder)
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let config: Config = builder
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| DomainError::Configuration(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let provider = &self.provider;

        if provider.connection_string.trim().is_empty() {
            return Err(DomainError::Configuration(
                "provider.connection_string must be set".to_string(),
            ));
        }
        ConnectionString::parse(&provider.connection_string).map_err(|e| match e {
            DomainError::Configuration(message) => {
                DomainError::Configuration(format!("provider.connection_string: {}", message))
            }
            other => other,
        })?;

        if provider.application_id.trim().is_empty() {
            return Err(DomainError::Configuration(
                "provider.application_id must be set".to_string(),
            ));
        }

        for (name, url) in [
            ("provider.callback_base_url", &provider.callback_base_url),
            ("provider.audio_file_uri", &provider.audio_file_uri),
        ] {
            if !matches!(url.scheme(), "http" | "https") {
                return Err(DomainError::Configuration(format!(
                    "{} must be an http(s) URL, got '{}'",
                    name, url
                )));
            }
        }

        if provider.request_timeout_secs == 0 {
            return Err(DomainError::Configuration(
                "provider.request_timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
