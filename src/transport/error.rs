//! Error types for transport operations.

use std::fmt;
use std::net::IpAddr;

use thiserror::Error;

/// The blocking phase of a request that ran out of time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeoutKind {
    /// Establishing the connection, bounded by `open_timeout`.
    Open,
    /// Waiting for and reading the response, bounded by `read_timeout`.
    Read,
}

impl fmt::Display for TimeoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => f.write_str("open"),
            Self::Read => f.write_str("read"),
        }
    }
}

/// Error type for transport operations.
///
/// Describes what went wrong on the wire without dictating recovery
/// strategy. Whether to try again is left to the caller.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// TLS handshake failures and other network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The connect or read phase exceeded its configured timeout.
    #[error("Request timed out during {0} phase")]
    Timeout(TimeoutKind),

    /// The provided URL is invalid.
    ///
    /// This typically indicates a configuration error rather than
    /// a transient failure.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A redirect target or a resolved address is forbidden by the
    /// request's destination policy. No connection was made to it.
    #[error("Destination address {address} is blocked")]
    Blocked {
        /// The forbidden address
        address: IpAddr,
    },
}

impl TransportError {
    /// Returns which phase timed out, if this is a timeout.
    #[must_use]
    pub const fn timeout_kind(&self) -> Option<TimeoutKind> {
        match self {
            Self::Timeout(kind) => Some(*kind),
            Self::Connection(_) | Self::InvalidUrl(_) | Self::Blocked { .. } => None,
        }
    }
}
