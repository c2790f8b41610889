//! Destination policy enforcement inside reqwest.
//!
//! Checking a URL before sending is not enough: reqwest resolves the host
//! again when it connects and follows redirects on its own. The resolver
//! and redirect policy here apply the [`DestinationPolicy`] at both points.

use std::error::Error as StdError;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use reqwest::dns::{Addrs, Name, Resolve, Resolving};
use reqwest::redirect;
use url::Host;

use crate::security::{DestinationError, DestinationPolicy};

/// Redirect hops followed before giving up, matching reqwest's default.
const MAX_REDIRECTS: usize = 10;

/// Resolves hosts and drops every address the policy forbids.
///
/// Fails with [`DestinationError::Blocked`] when nothing permitted is left,
/// so a host that re-resolves to an internal address between the sender's
/// check and the connect is still refused.
#[derive(Debug)]
pub(super) struct PolicyResolver {
    policy: DestinationPolicy,
}

impl PolicyResolver {
    pub(super) fn new(policy: DestinationPolicy) -> Arc<Self> {
        Arc::new(Self { policy })
    }
}

impl Resolve for PolicyResolver {
    fn resolve(&self, name: Name) -> Resolving {
        let policy = self.policy.clone();
        Box::pin(async move {
            let host = name.as_str().to_string();
            let resolved: Vec<SocketAddr> = tokio::net::lookup_host((host.as_str(), 0))
                .await
                .map_err(|source| DestinationError::Resolution {
                    host: host.clone(),
                    source,
                })?
                .collect();

            let permitted = filter_permitted(&policy, resolved)?;
            tracing::debug!(host = %host, addresses = permitted.len(), "Resolved destination");
            let addrs: Addrs = Box::new(permitted.into_iter());
            Ok::<_, Box<dyn StdError + Send + Sync>>(addrs)
        })
    }
}

/// Keeps the permitted addresses, or reports the first forbidden one when
/// none remain.
fn filter_permitted(
    policy: &DestinationPolicy,
    resolved: Vec<SocketAddr>,
) -> Result<Vec<SocketAddr>, DestinationError> {
    let first = resolved.first().map(SocketAddr::ip);
    let permitted: Vec<SocketAddr> = resolved
        .into_iter()
        .filter(|addr| policy.permits(addr.ip()))
        .collect();

    match (permitted.is_empty(), first) {
        (true, Some(address)) => Err(DestinationError::Blocked { address }),
        _ => Ok(permitted),
    }
}

/// Follows up to [`MAX_REDIRECTS`] hops, refusing literal-IP targets the
/// policy forbids. Named hosts are covered by [`PolicyResolver`].
pub(super) fn redirect_policy(policy: DestinationPolicy) -> redirect::Policy {
    redirect::Policy::custom(move |attempt| {
        let address = match attempt.url().host() {
            Some(Host::Ipv4(ip)) => Some(IpAddr::V4(ip)),
            Some(Host::Ipv6(ip)) => Some(IpAddr::V6(ip)),
            Some(Host::Domain(_)) | None => None,
        };

        match address {
            Some(address) if !policy.permits(address) => {
                tracing::warn!(%address, "Refusing redirect to blocked address");
                attempt.error(DestinationError::Blocked { address })
            }
            _ if attempt.previous().len() >= MAX_REDIRECTS => {
                attempt.error(format!("too many redirects (max {MAX_REDIRECTS})"))
            }
            _ => attempt.follow(),
        }
    })
}

/// Finds a policy rejection anywhere in an error's source chain.
pub(super) fn blocked_address(error: &(dyn StdError + 'static)) -> Option<IpAddr> {
    let mut current = Some(error);
    while let Some(err) = current {
        if let Some(DestinationError::Blocked { address }) = err.downcast_ref::<DestinationError>()
        {
            return Some(*address);
        }
        current = err.source();
    }
    None
}
