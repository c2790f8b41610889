//! The webhook sender.

use std::future::Future;
use std::time::Duration;

use http::{HeaderValue, Method, header::CONTENT_TYPE};
use url::Url;

use crate::config::{Configuration, global};
use crate::error::Error;
use crate::request::{RequestBody, SerializationError};
use crate::security::{Authenticator, Credential, DestinationError};
use crate::transport::{
    OutboundRequest, ReqwestTransport, TimeoutKind, Transport, TransportError,
};

use super::{DeliveryError, DeliveryResult};

/// Delivers signed webhook requests over a [`Transport`].
///
/// Each call to [`Sender::deliver`] makes exactly one attempt. The sender
/// keeps no per-call state, so one instance can be shared across tasks.
///
/// # Type Parameters
///
/// - `T`: The transport implementation (defaults to [`ReqwestTransport`])
///
/// # Example
///
/// ```no_run
/// use actionhook::{Credential, JsonRequest, Sender};
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let sender = Sender::default();
/// let request = JsonRequest::from_serialize(
///     Url::parse("https://api.example.com/hooks")?,
///     &serde_json::json!({"event": "ping"}),
/// )?;
/// let result = sender
///     .deliver(&request, &Credential::from("s3cr3t"), None)
///     .await?;
/// println!("Status: {}", result.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Sender<T = ReqwestTransport> {
    transport: T,
    authenticator: Authenticator,
    method: Method,
}

impl<T> Sender<T> {
    /// Creates a sender that POSTs through `transport` and signs with the
    /// default [`Authenticator`].
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            authenticator: Authenticator::new(),
            method: Method::POST,
        }
    }

    /// Sets the authenticator.
    #[must_use]
    pub fn with_authenticator(mut self, authenticator: Authenticator) -> Self {
        self.authenticator = authenticator;
        self
    }

    /// Sets the HTTP method.
    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Returns the transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the authenticator.
    #[must_use]
    pub const fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }

    /// Returns the HTTP method.
    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Serializes and signs `request` into the call the transport will make.
    ///
    /// Request headers are sent as given, then `Content-Type` and the
    /// signature header are set, replacing caller values under those names.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be serialized, the content type
    /// is not a valid header value, or signing fails.
    pub fn build_request(
        &self,
        request: &impl RequestBody,
        credential: &Credential,
    ) -> Result<OutboundRequest, Error> {
        let body = request.serialized_body()?;

        let content_type = HeaderValue::from_str(request.content_type()).map_err(|_| {
            SerializationError::InvalidContentType {
                content_type: request.content_type().to_string(),
            }
        })?;

        let signature_headers =
            self.authenticator
                .signature_headers(credential, request.headers(), &body)?;

        let mut outbound = OutboundRequest::new(self.method.clone(), request.url().clone())
            .with_body(body.into_owned());
        outbound.headers = request.headers().clone();
        outbound.headers.insert(CONTENT_TYPE, content_type);
        outbound.headers.extend(signature_headers);

        Ok(outbound)
    }
}

impl Default for Sender<ReqwestTransport> {
    fn default() -> Self {
        Self::new(ReqwestTransport::new())
    }
}

impl<T: Transport> Sender<T> {
    /// Signs and delivers `request`, waiting for the response.
    ///
    /// `configuration` overrides the process-wide configuration for this
    /// call only; `None` uses [`global::configuration`].
    ///
    /// Any response status is returned as a [`DeliveryResult`].
    ///
    /// # Errors
    ///
    /// Serialization and signing errors are returned before any network
    /// I/O. A rejected destination or a transport failure (connect or
    /// read timeout, connection, TLS or DNS failure) is returned as
    /// [`DeliveryError`].
    pub async fn deliver(
        &self,
        request: &impl RequestBody,
        credential: &Credential,
        configuration: Option<&Configuration>,
    ) -> Result<DeliveryResult, Error> {
        let configuration = global::resolve(configuration);
        let outbound = self
            .build_request(request, credential)?
            .with_destination_policy(configuration.destination_policy().clone());
        let url = outbound.url.clone();

        check_destination(
            &url,
            configuration.open_timeout(),
            configuration.destination_policy().check(&url),
        )
        .await?;

        tracing::debug!(
            url = %url,
            method = %outbound.method,
            body_len = outbound.body.len(),
            "Dispatching webhook"
        );

        match self
            .transport
            .open(outbound, configuration.net_http_options())
            .await
        {
            Ok(response) => {
                tracing::info!(url = %url, status = response.status.as_u16(), "Webhook delivered");
                Ok(response.into())
            }
            Err(TransportError::Blocked { address }) => {
                tracing::warn!(url = %url, %address, "Destination rejected by transport");
                let source = DestinationError::Blocked { address };
                Err(DeliveryError::Destination { url, source }.into())
            }
            Err(source) => {
                tracing::warn!(url = %url, error = %source, "Webhook delivery failed");
                Err(DeliveryError::Transport { url, source }.into())
            }
        }
    }
}

/// Awaits a destination check, bounded by the connect timeout.
///
/// Name resolution is part of opening a connection, so a resolver that
/// does not answer within `open_timeout` fails as an open-phase timeout.
pub(super) async fn check_destination(
    url: &Url,
    open_timeout: Duration,
    check: impl Future<Output = Result<(), DestinationError>>,
) -> Result<(), DeliveryError> {
    match tokio::time::timeout(open_timeout, check).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(source)) => {
            tracing::warn!(url = %url, error = %source, "Destination rejected");
            Err(DeliveryError::Destination {
                url: url.clone(),
                source,
            })
        }
        Err(_) => {
            tracing::warn!(url = %url, "Destination check timed out");
            Err(DeliveryError::Transport {
                url: url.clone(),
                source: TransportError::Timeout(TimeoutKind::Open),
            })
        }
    }
}

