//! Validated `send` configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated settings the `send` command
//! runs with. All validation is performed during construction, including
//! the strict timeout check the library itself leaves to callers.

use std::fmt;
use std::path::{Path, PathBuf};

use http::header::{HeaderName, HeaderValue};
use http::{HeaderMap, Method};
use ipnet::IpNet;
use url::Url;

use crate::security::{Authenticator, DestinationPolicy, SigningScheme};

use super::cli::SendArgs;
use super::configuration::{Configuration, ConfigurationOptions};
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::{TomlConfig, default_config_path};

/// Fully validated settings for one `send` invocation.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Webhook URL (required)
    pub url: Url,

    /// HTTP method for the webhook request
    pub method: Method,

    /// Extra HTTP headers for the webhook request
    pub headers: HeaderMap,

    /// Content type override for raw payloads
    pub content_type: Option<String>,

    /// Transport timeouts and destination policy
    pub configuration: Configuration,

    /// Signature header and scheme
    pub authenticator: Authenticator,

    /// Whether to stamp the current time into the timestamp header
    pub stamp_timestamp: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scheme = match self.authenticator.scheme() {
            SigningScheme::Body => "body".to_string(),
            SigningScheme::Timestamped { header } => format!("timestamped({header})"),
        };

        write!(
            f,
            "Send {{ url: {}, method: {}, headers: {}, signature_header: {}, scheme: {}, {} }}",
            self.url,
            self.method,
            self.headers.len(),
            self.authenticator.signature_header(),
            scheme,
            self.configuration,
        )
    }
}

impl ValidatedConfig {
    /// Creates validated settings from `send` arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The URL is missing or invalid
    /// - The method or a header is invalid
    /// - A blocked IP range is not valid CIDR notation
    /// - A timeout is zero
    pub fn from_raw(args: &SendArgs, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let url = Self::resolve_url(args, toml)?;
        let method = Self::resolve_method(args, toml)?;
        let headers = Self::resolve_headers(args, toml)?;
        let content_type = args
            .content_type
            .clone()
            .or_else(|| toml.and_then(|t| t.request.content_type.clone()));
        let configuration = Self::build_configuration(args, toml)?;
        let timestamp_header = Self::resolve_timestamp_header(args, toml)?;
        let authenticator = Self::build_authenticator(toml, timestamp_header.clone())?;

        Ok(Self {
            url,
            method,
            headers,
            content_type,
            configuration,
            authenticator,
            stamp_timestamp: timestamp_header.is_some(),
        })
    }

    /// Loads and merges configuration from CLI and the config file.
    ///
    /// An explicit `config_path` must exist. Without one, the platform
    /// default location is used if a file is present there.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(args: &SendArgs, config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let toml = match config_path {
            Some(path) => Some(TomlConfig::load(path)?),
            None => match default_config_path() {
                Some(path) if path.is_file() => Some(TomlConfig::load(&path)?),
                _ => None,
            },
        };

        Self::from_raw(args, toml.as_ref())
    }

    fn resolve_url(args: &SendArgs, toml: Option<&TomlConfig>) -> Result<Url, ConfigError> {
        // CLI takes precedence
        let url_str = args
            .url
            .as_deref()
            .or_else(|| toml.and_then(|t| t.request.url.as_deref()))
            .ok_or_else(|| {
                ConfigError::missing(field::URL, "Use --url or set request.url in config file")
            })?;

        parse_url(url_str)
    }

    fn resolve_method(args: &SendArgs, toml: Option<&TomlConfig>) -> Result<Method, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let method_str = args
            .method
            .as_deref()
            .or_else(|| toml.and_then(|t| t.request.method.as_deref()))
            .unwrap_or(defaults::METHOD);

        method_str
            .parse::<Method>()
            .map_err(|_| ConfigError::InvalidMethod(method_str.to_string()))
    }

    fn resolve_headers(
        args: &SendArgs,
        toml: Option<&TomlConfig>,
    ) -> Result<HeaderMap, ConfigError> {
        let mut headers = HeaderMap::new();

        // Add TOML headers first (CLI can override)
        if let Some(toml) = toml {
            for (name, value) in &toml.request.headers {
                let header_name = parse_header_name(name)?;
                let header_value = parse_header_value(name, value)?;
                headers.insert(header_name, header_value);
            }
        }

        // Add CLI headers (override TOML)
        for header_str in &args.headers {
            let (name, value) = parse_header_string(header_str)?;
            let header_name = parse_header_name(&name)?;
            let header_value = parse_header_value(&name, &value)?;
            headers.insert(header_name, header_value);
        }

        Ok(headers)
    }

    fn build_configuration(
        args: &SendArgs,
        toml: Option<&TomlConfig>,
    ) -> Result<Configuration, ConfigError> {
        let transport = toml.map(|t| t.transport).unwrap_or_default();

        // Priority: CLI explicit > TOML > default
        let options = ConfigurationOptions {
            open_timeout: args.open_timeout.or(transport.open_timeout),
            read_timeout: args.read_timeout.or(transport.read_timeout),
        };

        let blocked_ranges = toml
            .map(|t| t.security.blocked_ip_ranges.as_slice())
            .unwrap_or_default()
            .iter()
            .map(|range| parse_ip_range(range))
            .collect::<Result<Vec<_>, _>>()?;

        // Flags only enable, never disable
        let allow_private_ips =
            args.allow_private_ips || toml.is_some_and(|t| t.security.allow_private_ips);

        let policy = DestinationPolicy::new()
            .with_allow_private_ips(allow_private_ips)
            .with_blocked_ranges(blocked_ranges);

        let configuration = Configuration::from_options(options).with_destination_policy(policy);
        configuration.validate()?;
        Ok(configuration)
    }

    fn resolve_timestamp_header(
        args: &SendArgs,
        toml: Option<&TomlConfig>,
    ) -> Result<Option<HeaderName>, ConfigError> {
        let configured = toml.and_then(|t| t.security.timestamp_header.as_deref());

        match (configured, args.timestamp) {
            (Some(name), _) => parse_header_name(name).map(Some),
            (None, true) => Ok(Some(HeaderName::from_static(defaults::TIMESTAMP_HEADER))),
            (None, false) => Ok(None),
        }
    }

    fn build_authenticator(
        toml: Option<&TomlConfig>,
        timestamp_header: Option<HeaderName>,
    ) -> Result<Authenticator, ConfigError> {
        let mut authenticator = Authenticator::new();

        if let Some(name) = toml.and_then(|t| t.security.signature_header.as_deref()) {
            authenticator = authenticator.with_signature_header(parse_header_name(name)?);
        }

        if let Some(header) = timestamp_header {
            authenticator = authenticator.with_scheme(SigningScheme::Timestamped { header });
        }

        Ok(authenticator)
    }
}

/// Writes the default configuration template to a file.
///
/// Without an explicit path, writes to the platform default location,
/// creating its directory.
///
/// # Errors
///
/// Returns an error if no location is available or the file cannot be written.
pub fn write_default_config(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => default_config_path().ok_or_else(|| {
            ConfigError::missing(
                field::CONFIG_PATH,
                "No platform config directory; use --output",
            )
        })?,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::FileWrite {
            path: path.clone(),
            source: e,
        })?;
    }

    let template = super::toml::default_config_template();
    std::fs::write(&path, template).map_err(|e| ConfigError::FileWrite {
        path: path.clone(),
        source: e,
    })?;

    Ok(path)
}

// Helper functions

fn parse_url(s: &str) -> Result<Url, ConfigError> {
    Url::parse(s).map_err(|e| ConfigError::InvalidUrl {
        url: s.to_string(),
        reason: e.to_string(),
    })
}

fn parse_ip_range(s: &str) -> Result<IpNet, ConfigError> {
    s.parse::<IpNet>()
        .map_err(|source| ConfigError::InvalidIpRange {
            value: s.to_string(),
            source,
        })
}

fn parse_header_string(s: &str) -> Result<(String, String), ConfigError> {
    // Try "Key=Value" format first
    if let Some((name, value)) = s.split_once('=') {
        return Ok((name.trim().to_string(), value.trim().to_string()));
    }

    // Try "Key: Value" format
    if let Some((name, value)) = s.split_once(':') {
        return Ok((name.trim().to_string(), value.trim().to_string()));
    }

    Err(ConfigError::InvalidHeader {
        value: s.to_string(),
    })
}

fn parse_header_name(name: &str) -> Result<HeaderName, ConfigError> {
    name.parse::<HeaderName>()
        .map_err(|e| ConfigError::InvalidHeaderName {
            name: name.to_string(),
            reason: e.to_string(),
        })
}

fn parse_header_value(name: &str, value: &str) -> Result<HeaderValue, ConfigError> {
    HeaderValue::from_str(value).map_err(|e| ConfigError::InvalidHeaderValue {
        name: name.to_string(),
        reason: e.to_string(),
    })
}
