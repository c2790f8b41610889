//! Error types for signing and destination checks.

use std::net::IpAddr;

use thiserror::Error;

/// Error type for request signing.
///
/// Always raised before any network I/O takes place.
#[derive(Debug, Error)]
pub enum AuthenticationError {
    /// The shared secret is empty.
    #[error("Signing secret must not be empty")]
    EmptySecret,

    /// The secret was rejected by the MAC implementation.
    #[error("Signing secret rejected by HMAC key setup")]
    InvalidKey,

    /// The timestamped scheme is active but the request carries no timestamp.
    #[error("Missing timestamp header '{header}' required by the signing scheme")]
    MissingTimestamp {
        /// Name of the header the timestamp is read from
        header: String,
    },

    /// The timestamp header holds bytes that are not visible ASCII.
    #[error("Timestamp header '{header}' is not valid text")]
    InvalidTimestamp {
        /// Name of the header the timestamp is read from
        header: String,
    },

    /// The computed signature could not be encoded as a header value.
    #[error("Invalid signature header value: {0}")]
    InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),
}

/// Error type for destination checks.
#[derive(Debug, Error)]
pub enum DestinationError {
    /// The URL has no host component.
    #[error("URL has no host")]
    MissingHost,

    /// The destination host could not be resolved.
    #[error("Could not resolve host '{host}': {source}")]
    Resolution {
        /// The host that failed to resolve
        host: String,
        /// Underlying resolver error
        #[source]
        source: std::io::Error,
    },

    /// The destination resolves to an address the policy forbids.
    #[error("Destination address {address} is blocked")]
    Blocked {
        /// The offending resolved address
        address: IpAddr,
    },
}
