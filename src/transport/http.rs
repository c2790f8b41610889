//! Outbound request/response types and the transport trait.

use crate::config::NetHttpOptions;
use crate::security::DestinationPolicy;

use super::TransportError;

/// A fully built HTTP call, ready to hand to a [`Transport`].
///
/// Produced by the sender after serialization and signing. It uses
/// standard `http` crate types for method and headers so any HTTP
/// library can consume it.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    /// HTTP method (POST unless the sender was configured otherwise)
    pub method: http::Method,
    /// Target URL
    pub url: url::Url,
    /// HTTP headers to send, signature header included
    pub headers: http::HeaderMap,
    /// Serialized request body
    pub body: Vec<u8>,
    /// Addresses the transport may connect to, including redirect hops
    pub destination_policy: DestinationPolicy,
}

impl OutboundRequest {
    /// Creates a new request with the given method and URL.
    ///
    /// Headers are initialized to an empty map, the body is empty and the
    /// destination policy is unrestricted.
    #[must_use]
    pub fn new(method: http::Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: http::HeaderMap::new(),
            body: Vec::new(),
            destination_policy: DestinationPolicy::unrestricted(),
        }
    }

    /// Creates a POST request to the given URL.
    #[must_use]
    pub fn post(url: url::Url) -> Self {
        Self::new(http::Method::POST, url)
    }

    /// Sets the request body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets a header, replacing any previous value under the same name.
    #[must_use]
    pub fn with_header(mut self, name: http::HeaderName, value: http::HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Sets the policy the transport enforces on every address it connects to.
    #[must_use]
    pub fn with_destination_policy(mut self, policy: DestinationPolicy) -> Self {
        self.destination_policy = policy;
        self
    }

    /// Returns the body as a UTF-8 string, if valid.
    #[must_use]
    pub fn body_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }
}

/// What the remote endpoint answered.
///
/// The body is fully buffered into memory and left unparsed.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: http::StatusCode,
    /// Response headers
    pub headers: http::HeaderMap,
    /// Response body (fully buffered)
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Creates a new transport response.
    #[must_use]
    pub const fn new(status: http::StatusCode, headers: http::HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }
}

/// Trait for dispatching outbound webhook calls.
///
/// # Design
///
/// This trait abstracts the HTTP client implementation, enabling:
/// - Dependency injection for testing with stub transports
/// - Swapping HTTP libraries without changing the signing pipeline
///
/// Implementations must honor both timeouts in `options` and report
/// expiry as [`TransportError::Timeout`] with the matching phase. They
/// must also refuse to connect to any address, redirect targets included,
/// that the request's `destination_policy` forbids.
///
/// # Example
///
/// ```ignore
/// use actionhook::config::NetHttpOptions;
/// use actionhook::transport::{OutboundRequest, Transport, TransportError, TransportResponse};
///
/// struct EchoTransport;
///
/// impl Transport for EchoTransport {
///     async fn open(
///         &self,
///         req: OutboundRequest,
///         _options: NetHttpOptions,
///     ) -> Result<TransportResponse, TransportError> {
///         Ok(TransportResponse::new(http::StatusCode::OK, req.headers, req.body))
///     }
/// }
/// ```
pub trait Transport: Send + Sync {
    /// Sends an outbound request and returns the response.
    ///
    /// # Arguments
    ///
    /// * `req` - The fully built request to send
    /// * `options` - Connect and read timeouts for this call
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when:
    /// - Network connection fails ([`TransportError::Connection`])
    /// - Connect or read phase times out ([`TransportError::Timeout`])
    /// - URL is invalid ([`TransportError::InvalidUrl`])
    /// - A resolved or redirect address is forbidden ([`TransportError::Blocked`])
    fn open(
        &self,
        req: OutboundRequest,
        options: NetHttpOptions,
    ) -> impl std::future::Future<Output = Result<TransportResponse, TransportError>> + Send;
}
