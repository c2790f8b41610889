//! Tests for `DestinationPolicy`.

use super::{DestinationError, DestinationPolicy};
use std::net::IpAddr;

fn ip(s: &str) -> IpAddr {
    s.parse().unwrap()
}

fn url(s: &str) -> url::Url {
    url::Url::parse(s).unwrap()
}

mod permits {
    use super::*;

    #[test]
    fn default_blocks_internal_ipv4() {
        let policy = DestinationPolicy::new();

        for address in [
            "127.0.0.1",
            "10.1.2.3",
            "172.16.0.9",
            "192.168.1.1",
            "169.254.169.254",
            "0.0.0.0",
            "255.255.255.255",
            "100.64.0.1",
        ] {
            assert!(!policy.permits(ip(address)), "{address} should be blocked");
        }
    }

    #[test]
    fn default_blocks_internal_ipv6() {
        let policy = DestinationPolicy::new();

        for address in ["::1", "::", "fd00::1", "fe80::1", "::ffff:127.0.0.1"] {
            assert!(!policy.permits(ip(address)), "{address} should be blocked");
        }
    }

    #[test]
    fn default_permits_public_addresses() {
        let policy = DestinationPolicy::new();

        for address in ["93.184.216.34", "100.128.0.1", "2606:4700::1111"] {
            assert!(policy.permits(ip(address)), "{address} should be permitted");
        }
    }

    #[test]
    fn allow_private_ips_permits_internal() {
        let policy = DestinationPolicy::new().with_allow_private_ips(true);

        assert!(policy.permits(ip("127.0.0.1")));
        assert!(policy.permits(ip("10.0.0.1")));
        assert!(policy.is_unrestricted());
    }

    #[test]
    fn custom_ranges_apply_even_when_private_allowed() {
        let policy = DestinationPolicy::unrestricted()
            .with_blocked_range("203.0.113.0/24".parse::<ipnet::IpNet>().unwrap())
            .with_blocked_ranges(["2001:db8::/32".parse::<ipnet::IpNet>().unwrap()]);

        assert!(!policy.is_unrestricted());
        assert!(!policy.permits(ip("203.0.113.7")));
        assert!(!policy.permits(ip("2001:db8::5")));
        assert!(policy.permits(ip("198.51.100.1")));
        assert!(policy.permits(ip("10.0.0.1")));
        assert_eq!(policy.blocked_ranges().len(), 2);
    }
}

mod check {
    use super::*;

    #[tokio::test]
    async fn literal_public_ip_passes() {
        let policy = DestinationPolicy::new();

        policy
            .check(&url("https://93.184.216.34/hooks"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn literal_loopback_is_blocked() {
        let policy = DestinationPolicy::new();

        let result = policy.check(&url("http://127.0.0.1:8080/hooks")).await;

        match result {
            Err(DestinationError::Blocked { address }) => assert_eq!(address, ip("127.0.0.1")),
            other => panic!("Expected Blocked, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn literal_ipv6_loopback_is_blocked() {
        let policy = DestinationPolicy::new();

        let result = policy.check(&url("http://[::1]/hooks")).await;

        assert!(matches!(result, Err(DestinationError::Blocked { .. })));
    }

    #[tokio::test]
    async fn localhost_name_is_blocked_after_resolution() {
        let policy = DestinationPolicy::new();

        let result = policy.check(&url("http://localhost:9/hooks")).await;

        assert!(matches!(result, Err(DestinationError::Blocked { .. })));
    }

    #[tokio::test]
    async fn unrestricted_policy_skips_resolution() {
        let policy = DestinationPolicy::unrestricted();

        // Would fail to resolve if a lookup happened.
        policy
            .check(&url("http://invalid.invalid.invalid/hooks"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn url_without_host_is_rejected() {
        let policy = DestinationPolicy::new();

        let result = policy.check(&url("data:text/plain,hello")).await;

        assert!(matches!(result, Err(DestinationError::MissingHost)));
    }
}
