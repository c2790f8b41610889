//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Default connect timeout in seconds.
pub const OPEN_TIMEOUT_SECS: u64 = 5;

/// Default response read timeout in seconds.
pub const READ_TIMEOUT_SECS: u64 = 15;

/// Default HTTP method for webhook requests.
pub const METHOD: &str = "POST";

/// Default header carrying the request signature.
pub const SIGNATURE_HEADER: &str = "x-hook-signature";

/// Default header carrying the caller-supplied timestamp when the
/// timestamped signing scheme is enabled.
pub const TIMESTAMP_HEADER: &str = "x-hook-timestamp";

/// Content type of requests built with raw bodies.
pub const RAW_CONTENT_TYPE: &str = "application/octet-stream";

/// Content type of JSON requests.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Directory under the platform config dir holding the config file.
pub const CONFIG_DIR_NAME: &str = "actionhook";

/// File name of the config file.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default connect timeout as Duration.
#[must_use]
pub const fn open_timeout() -> Duration {
    Duration::from_secs(OPEN_TIMEOUT_SECS)
}

/// Default read timeout as Duration.
#[must_use]
pub const fn read_timeout() -> Duration {
    Duration::from_secs(READ_TIMEOUT_SECS)
}
