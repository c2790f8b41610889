//! Crate-level error type.
//!
//! Every fallible public operation returns one of the module errors, and
//! [`Error`] wraps them all so callers can use a single `?` chain.

use thiserror::Error;

use crate::config::ConfigError;
use crate::request::SerializationError;
use crate::security::{AuthenticationError, DestinationError};
use crate::sender::DeliveryError;
use crate::transport::{TimeoutKind, TransportError};

/// Any error raised by this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// The body could not be serialized. Raised before I/O.
    #[error(transparent)]
    Serialization(#[from] SerializationError),

    /// The request could not be signed. Raised before I/O.
    #[error(transparent)]
    Authentication(#[from] AuthenticationError),

    /// The request was built but not delivered.
    #[error(transparent)]
    Delivery(#[from] DeliveryError),

    /// Configuration could not be loaded or installed.
    #[error(transparent)]
    Configuration(#[from] ConfigError),
}

/// Coarse classification of an [`Error`], for retry decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Body serialization failed
    Serialization,
    /// Signing failed
    Authentication,
    /// The destination address is forbidden by policy
    Destination,
    /// Connect or read timed out
    Timeout,
    /// Connection, DNS, TLS or protocol failure
    Connection,
    /// The URL could not be used by the transport
    InvalidUrl,
    /// Configuration problem
    Configuration,
}

impl ErrorKind {
    /// Returns true if the failure may be transient and a retry could succeed.
    ///
    /// Retrying is left to the caller; the sender never retries.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::Timeout | Self::Connection)
    }
}

impl Error {
    /// Returns the kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Serialization(_) => ErrorKind::Serialization,
            Self::Authentication(_) => ErrorKind::Authentication,
            Self::Configuration(_) => ErrorKind::Configuration,
            // A failed lookup is a network failure, not a policy decision.
            Self::Delivery(DeliveryError::Destination {
                source: DestinationError::Resolution { .. },
                ..
            }) => ErrorKind::Connection,
            Self::Delivery(DeliveryError::Destination { .. }) => ErrorKind::Destination,
            Self::Delivery(DeliveryError::Transport { source, .. }) => match source {
                TransportError::Timeout(_) => ErrorKind::Timeout,
                TransportError::Connection(_) => ErrorKind::Connection,
                TransportError::InvalidUrl(_) => ErrorKind::InvalidUrl,
                TransportError::Blocked { .. } => ErrorKind::Destination,
            },
        }
    }

    /// Returns which phase timed out, if this was a delivery timeout.
    #[must_use]
    pub const fn timeout_kind(&self) -> Option<TimeoutKind> {
        match self {
            Self::Delivery(error) => error.timeout_kind(),
            _ => None,
        }
    }
}
