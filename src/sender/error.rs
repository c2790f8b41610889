//! Error types for webhook delivery.

use thiserror::Error;

use crate::security::DestinationError;
use crate::transport::{TimeoutKind, TransportError};

/// A fully built request could not be delivered.
///
/// Non-2xx responses are not errors; they come back as a
/// [`super::DeliveryResult`].
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The transport failed to complete the exchange.
    #[error("Delivery to {url} failed: {source}")]
    Transport {
        /// Destination URL
        url: url::Url,
        /// Underlying transport failure
        #[source]
        source: TransportError,
    },

    /// The destination was rejected before any connection was opened.
    #[error("Destination {url} rejected: {source}")]
    Destination {
        /// Destination URL
        url: url::Url,
        /// Why the destination was rejected
        #[source]
        source: DestinationError,
    },
}

impl DeliveryError {
    /// Returns the destination URL of the failed delivery.
    #[must_use]
    pub const fn url(&self) -> &url::Url {
        match self {
            Self::Transport { url, .. } | Self::Destination { url, .. } => url,
        }
    }

    /// Returns which phase timed out, if this was a timeout.
    #[must_use]
    pub const fn timeout_kind(&self) -> Option<TimeoutKind> {
        match self {
            Self::Transport { source, .. } => source.timeout_kind(),
            Self::Destination { .. } => None,
        }
    }

    /// Returns true if the connect or read phase timed out.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        self.timeout_kind().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};

    fn url() -> url::Url {
        url::Url::parse("https://example.com/hooks").unwrap()
    }

    #[test]
    fn read_timeout_is_exposed() {
        let error = DeliveryError::Transport {
            url: url(),
            source: TransportError::Timeout(TimeoutKind::Read),
        };

        assert_eq!(error.timeout_kind(), Some(TimeoutKind::Read));
        assert!(error.is_timeout());
        assert_eq!(error.url(), &url());
    }

    #[test]
    fn connection_failure_is_not_a_timeout() {
        let error = DeliveryError::Transport {
            url: url(),
            source: TransportError::Connection("refused".into()),
        };

        assert_eq!(error.timeout_kind(), None);
    }

    #[test]
    fn blocked_destination_message_names_address() {
        let error = DeliveryError::Destination {
            url: url(),
            source: DestinationError::Blocked {
                address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            },
        };

        assert!(!error.is_timeout());
        assert!(error.to_string().contains("127.0.0.1"));
    }
}
