use crate::error::{EegviewError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Default backend origin; every endpoint is derived from configuration, no
/// call site hard-codes a URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Default upload ceiling: 100 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 100 * 1024 * 1024;

/// Default analysis request timeout: 5 minutes.
pub const DEFAULT_ANALYSIS_TIMEOUT_SECS: u64 = 300;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered client configuration: Default < File < Environment < CLI.
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    /// HTTP origin of the analysis backend
    pub base_url: ConfigValue<String>,

    /// WebSocket URL for the persistent channel; derived from `base_url`
    /// when unset
    pub socket_url: ConfigValue<Option<String>>,

    pub max_upload_bytes: ConfigValue<u64>,
    pub analysis_timeout_secs: ConfigValue<u64>,
    pub reconnect_attempts: ConfigValue<u32>,
    pub reconnect_delay_secs: ConfigValue<u64>,

    /// Unit suffix for amplitude tooltips
    pub amplitude_unit: ConfigValue<String>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            base_url: ConfigValue::new(DEFAULT_BASE_URL.to_string(), ConfigSource::Default),
            socket_url: ConfigValue::new(None, ConfigSource::Default),
            max_upload_bytes: ConfigValue::new(DEFAULT_MAX_UPLOAD_BYTES, ConfigSource::Default),
            analysis_timeout_secs: ConfigValue::new(
                DEFAULT_ANALYSIS_TIMEOUT_SECS,
                ConfigSource::Default,
            ),
            reconnect_attempts: ConfigValue::new(5, ConfigSource::Default),
            reconnect_delay_secs: ConfigValue::new(3, ConfigSource::Default),
            amplitude_unit: ConfigValue::new("µV".to_string(), ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| EegviewError::ConfigInvalid {
            key: "file".to_string(),
            reason: format!("Failed to read config file: {}", e),
        })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| EegviewError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(base_url) = file_config.base_url {
            self.base_url.update(base_url, ConfigSource::File);
        }
        if let Some(socket_url) = file_config.socket_url {
            self.socket_url.update(Some(socket_url), ConfigSource::File);
        }
        if let Some(mb) = file_config.max_upload_mb {
            self.max_upload_bytes.update(mb * 1024 * 1024, ConfigSource::File);
        }
        if let Some(secs) = file_config.analysis_timeout_secs {
            self.analysis_timeout_secs.update(secs, ConfigSource::File);
        }
        if let Some(attempts) = file_config.reconnect_attempts {
            self.reconnect_attempts.update(attempts, ConfigSource::File);
        }
        if let Some(secs) = file_config.reconnect_delay_secs {
            self.reconnect_delay_secs.update(secs, ConfigSource::File);
        }
        if let Some(unit) = file_config.amplitude_unit {
            self.amplitude_unit.update(unit, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        if let Ok(base_url) = env::var("EEGVIEW_BASE_URL") {
            self.base_url.update(base_url, ConfigSource::Environment);
        }

        if let Ok(socket_url) = env::var("EEGVIEW_SOCKET_URL") {
            self.socket_url.update(Some(socket_url), ConfigSource::Environment);
        }

        if let Ok(mb_str) = env::var("EEGVIEW_MAX_UPLOAD_MB") {
            match mb_str.parse::<u64>() {
                Ok(mb) => self
                    .max_upload_bytes
                    .update(mb * 1024 * 1024, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid EEGVIEW_MAX_UPLOAD_MB value '{}': expected integer megabytes",
                    mb_str
                ),
            }
        }

        if let Ok(secs_str) = env::var("EEGVIEW_ANALYSIS_TIMEOUT_SECS") {
            match secs_str.parse::<u64>() {
                Ok(secs) => self
                    .analysis_timeout_secs
                    .update(secs, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid EEGVIEW_ANALYSIS_TIMEOUT_SECS value '{}': expected integer seconds",
                    secs_str
                ),
            }
        }

        if let Ok(attempts_str) = env::var("EEGVIEW_RECONNECT_ATTEMPTS") {
            match attempts_str.parse::<u32>() {
                Ok(attempts) => self
                    .reconnect_attempts
                    .update(attempts, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid EEGVIEW_RECONNECT_ATTEMPTS value '{}': expected integer",
                    attempts_str
                ),
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(base_url) = overrides.base_url {
            self.base_url.update(base_url, ConfigSource::Cli);
        }
        if let Some(socket_url) = overrides.socket_url {
            self.socket_url.update(Some(socket_url), ConfigSource::Cli);
        }
        if let Some(secs) = overrides.analysis_timeout_secs {
            self.analysis_timeout_secs.update(secs, ConfigSource::Cli);
        }
    }

    /// Flatten the layers into the value object the adapters consume.
    pub fn resolved(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.value.trim_end_matches('/').to_string(),
            socket_url: self.socket_url.value.clone(),
            max_upload_bytes: self.max_upload_bytes.value,
            analysis_timeout: Duration::from_secs(self.analysis_timeout_secs.value),
            reconnect_attempts: self.reconnect_attempts.value,
            reconnect_delay: Duration::from_secs(self.reconnect_delay_secs.value),
            amplitude_unit: self.amplitude_unit.value.clone(),
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> BTreeMap<String, (String, ConfigSource)> {
        let mut map = BTreeMap::new();

        map.insert(
            "base_url".to_string(),
            (self.base_url.value.clone(), self.base_url.source),
        );
        map.insert(
            "socket_url".to_string(),
            (
                self.socket_url
                    .value
                    .clone()
                    .unwrap_or_else(|| "(derived from base_url)".to_string()),
                self.socket_url.source,
            ),
        );
        map.insert(
            "max_upload_bytes".to_string(),
            (
                self.max_upload_bytes.value.to_string(),
                self.max_upload_bytes.source,
            ),
        );
        map.insert(
            "analysis_timeout_secs".to_string(),
            (
                self.analysis_timeout_secs.value.to_string(),
                self.analysis_timeout_secs.source,
            ),
        );
        map.insert(
            "reconnect_attempts".to_string(),
            (
                self.reconnect_attempts.value.to_string(),
                self.reconnect_attempts.source,
            ),
        );
        map.insert(
            "reconnect_delay_secs".to_string(),
            (
                self.reconnect_delay_secs.value.to_string(),
                self.reconnect_delay_secs.source,
            ),
        );
        map.insert(
            "amplitude_unit".to_string(),
            (self.amplitude_unit.value.clone(), self.amplitude_unit.source),
        );

        map
    }
}

/// Resolved configuration consumed by the transports and the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    pub socket_url: Option<String>,
    pub max_upload_bytes: u64,
    pub analysis_timeout: Duration,
    pub reconnect_attempts: u32,
    pub reconnect_delay: Duration,
    pub amplitude_unit: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        LayeredConfig::with_defaults().resolved()
    }
}

impl ClientConfig {
    /// Upload endpoint.
    pub fn upload_url(&self) -> String {
        format!("{}/api/eeg-data", self.base_url)
    }

    /// Analysis endpoint.
    pub fn process_url(&self) -> String {
        format!("{}/api/process", self.base_url)
    }

    /// WebSocket URL for the persistent channel. Falls back to the HTTP
    /// origin with the scheme swapped to ws/wss.
    pub fn channel_url(&self) -> String {
        match &self.socket_url {
            Some(url) => url.clone(),
            None => {
                if let Some(rest) = self.base_url.strip_prefix("https://") {
                    format!("wss://{}", rest)
                } else if let Some(rest) = self.base_url.strip_prefix("http://") {
                    format!("ws://{}", rest)
                } else {
                    format!("ws://{}", self.base_url)
                }
            }
        }
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    base_url: Option<String>,
    socket_url: Option<String>,
    max_upload_mb: Option<u64>,
    analysis_timeout_secs: Option<u64>,
    reconnect_attempts: Option<u32>,
    reconnect_delay_secs: Option<u64>,
    amplitude_unit: Option<String>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub base_url: Option<String>,
    pub socket_url: Option<String>,
    pub analysis_timeout_secs: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = LayeredConfig::with_defaults();
        assert_eq!(config.base_url.value, DEFAULT_BASE_URL);
        assert_eq!(config.base_url.source, ConfigSource::Default);
        assert_eq!(config.max_upload_bytes.value, 100 * 1024 * 1024);
        assert_eq!(config.analysis_timeout_secs.value, 300);
        assert_eq!(config.reconnect_attempts.value, 5);
        assert_eq!(config.reconnect_delay_secs.value, 3);
    }

    #[test]
    fn test_config_precedence() {
        let mut value = ConfigValue::new(100, ConfigSource::Default);

        value.update(200, ConfigSource::File);
        assert_eq!(value.value, 200);
        assert_eq!(value.source, ConfigSource::File);

        value.update(300, ConfigSource::Environment);
        assert_eq!(value.value, 300);

        value.update(400, ConfigSource::Cli);
        assert_eq!(value.value, 400);

        // Lower precedence should not override
        value.update(500, ConfigSource::File);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
base_url = "http://eeg.example.org:8000"
max_upload_mb = 10
analysis_timeout_secs = 60
"#
        )
        .unwrap();

        let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

        assert_eq!(config.base_url.value, "http://eeg.example.org:8000");
        assert_eq!(config.base_url.source, ConfigSource::File);
        assert_eq!(config.max_upload_bytes.value, 10 * 1024 * 1024);
        assert_eq!(config.analysis_timeout_secs.value, 60);
        // Untouched values keep their defaults
        assert_eq!(config.reconnect_attempts.source, ConfigSource::Default);
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = LayeredConfig::with_defaults();
        config.update_from_cli(CliConfigOverrides {
            base_url: Some("http://127.0.0.1:9999".to_string()),
            socket_url: None,
            analysis_timeout_secs: Some(30),
        });

        assert_eq!(config.base_url.value, "http://127.0.0.1:9999");
        assert_eq!(config.base_url.source, ConfigSource::Cli);
        assert_eq!(config.analysis_timeout_secs.value, 30);
        assert_eq!(config.socket_url.source, ConfigSource::Default);
    }

    #[test]
    fn endpoints_derive_from_base_url() {
        let config = ClientConfig::default();
        assert_eq!(config.upload_url(), "http://localhost:5000/api/eeg-data");
        assert_eq!(config.process_url(), "http://localhost:5000/api/process");
        assert_eq!(config.channel_url(), "ws://localhost:5000");
    }

    #[test]
    fn explicit_socket_url_wins() {
        let config = ClientConfig {
            socket_url: Some("wss://eeg.example.org/socket".to_string()),
            ..ClientConfig::default()
        };
        assert_eq!(config.channel_url(), "wss://eeg.example.org/socket");
    }

    #[test]
    fn trailing_slash_is_normalized() {
        let mut layered = LayeredConfig::with_defaults();
        layered
            .base_url
            .update("http://localhost:5000/".to_string(), ConfigSource::Cli);
        assert_eq!(layered.resolved().base_url, "http://localhost:5000");
    }

    #[test]
    fn test_inspection_map() {
        let config = LayeredConfig::with_defaults();
        let map = config.to_inspection_map();

        assert!(map.contains_key("base_url"));
        assert!(map.contains_key("analysis_timeout_secs"));

        let (base, source) = &map["base_url"];
        assert_eq!(base, DEFAULT_BASE_URL);
        assert_eq!(*source, ConfigSource::Default);
    }
}
