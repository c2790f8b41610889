//! Transport configuration passed to each delivery.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use crate::security::DestinationPolicy;

use super::ConfigError;
use super::defaults;

/// The resolved timeout pair used to configure the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NetHttpOptions {
    /// Upper bound on establishing the connection
    pub open_timeout: Duration,
    /// Upper bound on waiting for and reading the response
    pub read_timeout: Duration,
}

/// Optional timeout settings in whole seconds.
///
/// Any option left as `None` takes its default. Doubles as the
/// `[transport]` section of the configuration file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigurationOptions {
    /// Connect timeout in seconds
    pub open_timeout: Option<u64>,

    /// Read timeout in seconds
    pub read_timeout: Option<u64>,
}

/// Settings shared by deliveries: transport timeouts and the destination
/// policy.
///
/// Immutable once constructed. A single instance may be installed as the
/// process-wide default (see [`super::global`]) or passed explicitly to
/// each delivery.
///
/// Values are not validated on construction; a zero timeout is handed to
/// the transport unchanged. Call [`Configuration::validate`] to reject it.
///
/// # Example
///
/// ```
/// use actionhook::config::{Configuration, ConfigurationOptions};
/// use std::time::Duration;
///
/// let config = Configuration::from_options(ConfigurationOptions {
///     open_timeout: Some(10),
///     read_timeout: Some(30),
/// });
/// assert_eq!(config.net_http_options().open_timeout, Duration::from_secs(10));
/// assert_eq!(config.net_http_options().read_timeout, Duration::from_secs(30));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    open_timeout: Duration,
    read_timeout: Duration,
    destination_policy: DestinationPolicy,
}

impl Configuration {
    /// Default connect timeout in seconds.
    pub const DEFAULT_OPEN_TIMEOUT_IN_SECONDS: u64 = defaults::OPEN_TIMEOUT_SECS;

    /// Default read timeout in seconds.
    pub const DEFAULT_READ_TIMEOUT_IN_SECONDS: u64 = defaults::READ_TIMEOUT_SECS;

    /// Creates a configuration with default timeouts and a destination
    /// policy that blocks internal address space.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            open_timeout: defaults::open_timeout(),
            read_timeout: defaults::read_timeout(),
            destination_policy: DestinationPolicy::new(),
        }
    }

    /// Creates a configuration from optional settings, applying defaults
    /// for anything omitted.
    #[must_use]
    pub const fn from_options(options: ConfigurationOptions) -> Self {
        let open_timeout = match options.open_timeout {
            Some(secs) => Duration::from_secs(secs),
            None => defaults::open_timeout(),
        };
        let read_timeout = match options.read_timeout {
            Some(secs) => Duration::from_secs(secs),
            None => defaults::read_timeout(),
        };

        Self {
            open_timeout,
            read_timeout,
            destination_policy: DestinationPolicy::new(),
        }
    }

    /// Sets the connect timeout.
    #[must_use]
    pub const fn with_open_timeout(mut self, timeout: Duration) -> Self {
        self.open_timeout = timeout;
        self
    }

    /// Sets the read timeout.
    #[must_use]
    pub const fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Sets the destination policy.
    #[must_use]
    pub fn with_destination_policy(mut self, policy: DestinationPolicy) -> Self {
        self.destination_policy = policy;
        self
    }

    /// Returns the connect timeout.
    #[must_use]
    pub const fn open_timeout(&self) -> Duration {
        self.open_timeout
    }

    /// Returns the read timeout.
    #[must_use]
    pub const fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    /// Returns the destination policy.
    #[must_use]
    pub const fn destination_policy(&self) -> &DestinationPolicy {
        &self.destination_policy
    }

    /// Returns the timeout pair handed to the transport.
    #[must_use]
    pub const fn net_http_options(&self) -> NetHttpOptions {
        NetHttpOptions {
            open_timeout: self.open_timeout,
            read_timeout: self.read_timeout,
        }
    }

    /// Rejects zero timeouts.
    ///
    /// Not called on construction; callers wanting strict settings opt in.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDuration`] naming the first zero timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.open_timeout.is_zero() {
            return Err(ConfigError::InvalidDuration {
                field: "open_timeout",
                reason: "must be greater than 0".to_string(),
            });
        }

        if self.read_timeout.is_zero() {
            return Err(ConfigError::InvalidDuration {
                field: "read_timeout",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Configuration {{ open_timeout: {}ms, read_timeout: {}ms, allow_private_ips: {}, \
             blocked_ranges: {} }}",
            self.open_timeout.as_millis(),
            self.read_timeout.as_millis(),
            self.destination_policy.allow_private_ips(),
            self.destination_policy.blocked_ranges().len(),
        )
    }
}
