//! Destination filtering for outbound webhooks.
//!
//! A webhook URL is usually supplied by a third party, so deliveries
//! are refused when the destination resolves to loopback, private,
//! link-local or other internal address space unless explicitly allowed.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use ipnet::IpNet;
use url::{Host, Url};

use super::DestinationError;

/// Which resolved destination addresses a delivery may target.
///
/// # Defaults
///
/// - `allow_private_ips`: `false`
/// - `blocked_ranges`: empty
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DestinationPolicy {
    allow_private_ips: bool,
    blocked_ranges: Vec<IpNet>,
}

impl DestinationPolicy {
    /// Creates a policy that blocks internal address space.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            allow_private_ips: false,
            blocked_ranges: Vec::new(),
        }
    }

    /// Creates a policy that permits every address.
    #[must_use]
    pub const fn unrestricted() -> Self {
        Self {
            allow_private_ips: true,
            blocked_ranges: Vec::new(),
        }
    }

    /// Sets whether internal address space may be targeted.
    #[must_use]
    pub const fn with_allow_private_ips(mut self, allow: bool) -> Self {
        self.allow_private_ips = allow;
        self
    }

    /// Adds a custom blocked range, applied regardless of `allow_private_ips`.
    #[must_use]
    pub fn with_blocked_range(mut self, range: IpNet) -> Self {
        self.blocked_ranges.push(range);
        self
    }

    /// Adds several custom blocked ranges.
    #[must_use]
    pub fn with_blocked_ranges(mut self, ranges: impl IntoIterator<Item = IpNet>) -> Self {
        self.blocked_ranges.extend(ranges);
        self
    }

    /// Returns whether internal address space may be targeted.
    #[must_use]
    pub const fn allow_private_ips(&self) -> bool {
        self.allow_private_ips
    }

    /// Returns the custom blocked ranges.
    #[must_use]
    pub fn blocked_ranges(&self) -> &[IpNet] {
        &self.blocked_ranges
    }

    /// Returns true if no address can be rejected, so resolution can be skipped.
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.allow_private_ips && self.blocked_ranges.is_empty()
    }

    /// Returns true if `address` may be targeted.
    #[must_use]
    pub fn permits(&self, address: IpAddr) -> bool {
        if !self.allow_private_ips && is_internal(address) {
            return false;
        }
        !self
            .blocked_ranges
            .iter()
            .any(|range| range.contains(&address))
    }

    /// Resolves the URL's host and checks every resulting address.
    ///
    /// Literal IP hosts are checked without a lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL has no host, the host cannot be
    /// resolved, or any resolved address is not permitted.
    pub async fn check(&self, url: &Url) -> Result<(), DestinationError> {
        if self.is_unrestricted() {
            return Ok(());
        }

        let addresses: Vec<IpAddr> = match url.host() {
            Some(Host::Ipv4(ip)) => vec![IpAddr::V4(ip)],
            Some(Host::Ipv6(ip)) => vec![IpAddr::V6(ip)],
            Some(Host::Domain(domain)) => {
                let port = url.port_or_known_default().unwrap_or(80);
                tokio::net::lookup_host((domain, port))
                    .await
                    .map_err(|source| DestinationError::Resolution {
                        host: domain.to_string(),
                        source,
                    })?
                    .map(|addr| addr.ip())
                    .collect()
            }
            None => return Err(DestinationError::MissingHost),
        };

        match addresses.into_iter().find(|ip| !self.permits(*ip)) {
            Some(address) => Err(DestinationError::Blocked { address }),
            None => Ok(()),
        }
    }
}

/// Returns true for loopback, private, link-local, shared, unspecified and
/// broadcast addresses, including IPv4-mapped IPv6 forms.
fn is_internal(address: IpAddr) -> bool {
    match address {
        IpAddr::V4(v4) => is_internal_v4(v4),
        IpAddr::V6(v6) => v6.to_ipv4_mapped().map_or_else(|| is_internal_v6(v6), is_internal_v4),
    }
}

fn is_internal_v4(address: Ipv4Addr) -> bool {
    let [a, b, ..] = address.octets();
    address.is_loopback()
        || address.is_private()
        || address.is_link_local()
        || address.is_unspecified()
        || address.is_broadcast()
        // 100.64.0.0/10 carrier-grade NAT
        || (a == 100 && (b & 0xc0) == 64)
}

fn is_internal_v6(address: Ipv6Addr) -> bool {
    address.is_loopback()
        || address.is_unspecified()
        || address.is_unique_local()
        || address.is_unicast_link_local()
}
