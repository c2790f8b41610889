//! Production transport implementation using reqwest.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::config::NetHttpOptions;
use crate::security::DestinationPolicy;

use super::guard::{PolicyResolver, blocked_address, redirect_policy};
use super::{OutboundRequest, TimeoutKind, Transport, TransportError, TransportResponse};

/// Cache key: reqwest fixes timeouts, resolver and redirect policy at build time.
type ClientKey = (NetHttpOptions, DestinationPolicy);

/// Production transport using reqwest.
///
/// reqwest fixes connect and read timeouts when a client is built, so one
/// `reqwest::Client` is kept per distinct [`NetHttpOptions`] and
/// [`DestinationPolicy`]. Each cached client keeps its own connection pool.
///
/// For a restricted policy the client resolves names through the policy,
/// refuses redirects to forbidden addresses and ignores proxy settings, so
/// the address actually connected to is the one that was checked.
///
/// # Example
///
/// ```no_run
/// use actionhook::config::Configuration;
/// use actionhook::transport::{OutboundRequest, ReqwestTransport, Transport};
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let transport = ReqwestTransport::new();
/// let url = Url::parse("https://api.example.com/webhook")?;
/// let request = OutboundRequest::post(url).with_body(b"hello".to_vec());
/// let response = transport
///     .open(request, Configuration::new().net_http_options())
///     .await?;
/// println!("Status: {}", response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ReqwestTransport {
    clients: Mutex<HashMap<ClientKey, reqwest::Client>>,
    bypass_proxy: bool,
}

impl ReqwestTransport {
    /// Creates a new transport with reqwest's default behavior
    /// (system proxies, rustls, redirect following).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ignores proxy settings from the environment.
    #[must_use]
    pub const fn without_proxy(mut self) -> Self {
        self.bypass_proxy = true;
        self
    }

    /// Returns the client configured for `options` and `policy`, building
    /// it on first use.
    fn client_for(
        &self,
        options: NetHttpOptions,
        policy: &DestinationPolicy,
    ) -> Result<reqwest::Client, TransportError> {
        let mut clients = self.clients.lock().unwrap_or_else(PoisonError::into_inner);

        let key = (options, policy.clone());
        if let Some(client) = clients.get(&key) {
            return Ok(client.clone());
        }

        let mut builder = reqwest::Client::builder()
            .connect_timeout(options.open_timeout)
            .read_timeout(options.read_timeout);
        if self.bypass_proxy {
            builder = builder.no_proxy();
        }
        if !policy.is_unrestricted() {
            builder = builder
                .no_proxy()
                .dns_resolver(PolicyResolver::new(policy.clone()))
                .redirect(redirect_policy(policy.clone()));
        }

        let client = builder
            .build()
            .map_err(|e| TransportError::Connection(Box::new(e)))?;

        tracing::debug!(
            open_timeout_ms = options.open_timeout.as_millis(),
            read_timeout_ms = options.read_timeout.as_millis(),
            restricted = !policy.is_unrestricted(),
            "Built HTTP client"
        );

        clients.insert(key, client.clone());
        Ok(client)
    }
}

impl Transport for ReqwestTransport {
    async fn open(
        &self,
        req: OutboundRequest,
        options: NetHttpOptions,
    ) -> Result<TransportResponse, TransportError> {
        let client = self.client_for(options, &req.destination_policy)?;

        let response = client
            .request(req.method, req.url)
            .headers(req.headers)
            .body(req.body)
            .send()
            .await
            .map_err(classify)?;

        // Extract response parts
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(classify)?.to_vec();

        Ok(TransportResponse::new(status, headers, body))
    }
}

/// Maps a reqwest failure onto the transport taxonomy.
///
/// reqwest reports an expired connect timeout as a connect error whose
/// source chain contains the timeout, so `is_connect` separates the phases.
/// Policy rejections from the resolver or redirect policy win over both.
fn classify(e: reqwest::Error) -> TransportError {
    if let Some(address) = blocked_address(&e) {
        TransportError::Blocked { address }
    } else if e.is_timeout() {
        if e.is_connect() {
            TransportError::Timeout(TimeoutKind::Open)
        } else {
            TransportError::Timeout(TimeoutKind::Read)
        }
    } else if e.is_builder() {
        TransportError::InvalidUrl(e.to_string())
    } else {
        TransportError::Connection(Box::new(e))
    }
}
