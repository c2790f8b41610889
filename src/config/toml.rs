//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::configuration::ConfigurationOptions;
use super::{ConfigError, defaults};

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Transport timeouts
    #[serde(default)]
    pub transport: ConfigurationOptions,

    /// Signing and destination settings
    #[serde(default)]
    pub security: SecuritySection,

    /// Request defaults
    #[serde(default)]
    pub request: RequestSection,
}

/// Signing and destination configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SecuritySection {
    /// Permit destinations in loopback/private/link-local space
    #[serde(default)]
    pub allow_private_ips: bool,

    /// Additional CIDR ranges that are never targeted
    #[serde(default)]
    pub blocked_ip_ranges: Vec<String>,

    /// Header the signature is written to
    pub signature_header: Option<String>,

    /// Header carrying the caller's timestamp; enables timestamped signing
    pub timestamp_header: Option<String>,
}

/// Request defaults section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequestSection {
    /// Webhook URL
    pub url: Option<String>,

    /// HTTP method (default: POST)
    pub method: Option<String>,

    /// Content type for raw (`--data`) payloads
    pub content_type: Option<String>,

    /// HTTP headers as key-value pairs
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Returns the platform default config file path, if the platform has a
/// config directory (`~/.config/actionhook/config.toml` on Linux).
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| {
        dir.join(defaults::CONFIG_DIR_NAME)
            .join(defaults::CONFIG_FILE_NAME)
    })
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# ActionHook Configuration File

[transport]
# Seconds allowed for establishing the connection (default: 5)
open_timeout = 5

# Seconds allowed for waiting on and reading the response (default: 15)
read_timeout = 15

[security]
# Permit destinations resolving to loopback, private or link-local addresses
# allow_private_ips = false

# Additional CIDR ranges that are never targeted
# blocked_ip_ranges = ["203.0.113.0/24"]

# Header the HMAC-SHA256 signature is written to (default: X-Hook-Signature)
# signature_header = "X-Hook-Signature"

# Enables timestamped signing over "{timestamp}.{body}".
# The timestamp is read from this request header.
# timestamp_header = "X-Hook-Timestamp"

[request]
# Webhook URL (required unless --url is given)
# url = "https://api.example.com/hooks"

# HTTP method (default: POST)
# method = "POST"

# Content type for --data payloads (default: application/octet-stream)
# content_type = "text/plain"

# HTTP headers
# [request.headers]
# X-Custom-Header = "value"
"#
    .to_string()
}
