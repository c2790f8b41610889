//! Tests for `Configuration` and `NetHttpOptions`.

use super::{ConfigError, Configuration, ConfigurationOptions, NetHttpOptions};
use crate::security::DestinationPolicy;
use std::time::Duration;

mod net_http_options {
    use super::*;

    #[test]
    fn returns_the_default_values() {
        assert_eq!(
            Configuration::new().net_http_options(),
            NetHttpOptions {
                open_timeout: Duration::from_secs(Configuration::DEFAULT_OPEN_TIMEOUT_IN_SECONDS),
                read_timeout: Duration::from_secs(Configuration::DEFAULT_READ_TIMEOUT_IN_SECONDS),
            }
        );
    }

    #[test]
    fn allows_custom_timeout_values() {
        let config = Configuration::from_options(ConfigurationOptions {
            open_timeout: Some(10),
            read_timeout: Some(30),
        });

        assert_eq!(
            config.net_http_options(),
            NetHttpOptions {
                open_timeout: Duration::from_secs(10),
                read_timeout: Duration::from_secs(30),
            }
        );
    }

    #[test]
    fn omitted_options_take_defaults() {
        let config = Configuration::from_options(ConfigurationOptions {
            open_timeout: None,
            read_timeout: Some(30),
        });

        assert_eq!(
            config.open_timeout(),
            Duration::from_secs(Configuration::DEFAULT_OPEN_TIMEOUT_IN_SECONDS)
        );
        assert_eq!(config.read_timeout(), Duration::from_secs(30));
        assert_eq!(
            Configuration::from_options(ConfigurationOptions::default()),
            Configuration::new()
        );
    }

    #[test]
    fn builder_overrides_timeouts() {
        let config = Configuration::new()
            .with_open_timeout(Duration::from_millis(250))
            .with_read_timeout(Duration::from_millis(750));

        assert_eq!(config.net_http_options().open_timeout, Duration::from_millis(250));
        assert_eq!(config.net_http_options().read_timeout, Duration::from_millis(750));
    }
}

mod permissive_construction {
    use super::*;

    #[test]
    fn zero_timeouts_pass_through_unchanged() {
        let config = Configuration::from_options(ConfigurationOptions {
            open_timeout: Some(0),
            read_timeout: Some(0),
        });

        assert_eq!(config.open_timeout(), Duration::ZERO);
        assert_eq!(config.read_timeout(), Duration::ZERO);
    }

    #[test]
    fn validate_rejects_zero_open_timeout() {
        let config = Configuration::new().with_open_timeout(Duration::ZERO);

        match config.validate() {
            Err(ConfigError::InvalidDuration { field, .. }) => assert_eq!(field, "open_timeout"),
            other => panic!("Expected InvalidDuration, got {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_zero_read_timeout() {
        let config = Configuration::new().with_read_timeout(Duration::ZERO);

        match config.validate() {
            Err(ConfigError::InvalidDuration { field, .. }) => assert_eq!(field, "read_timeout"),
            other => panic!("Expected InvalidDuration, got {other:?}"),
        }
    }

    #[test]
    fn validate_accepts_defaults() {
        assert!(Configuration::new().validate().is_ok());
    }
}

mod destination_policy {
    use super::*;

    #[test]
    fn default_blocks_private_destinations() {
        let config = Configuration::default();

        assert!(!config.destination_policy().allow_private_ips());
        assert!(config.destination_policy().blocked_ranges().is_empty());
    }

    #[test]
    fn with_destination_policy_replaces_policy() {
        let config = Configuration::new().with_destination_policy(DestinationPolicy::unrestricted());

        assert!(config.destination_policy().is_unrestricted());
    }
}

mod display {
    use super::*;

    #[test]
    fn summarizes_settings() {
        let display = Configuration::new().to_string();

        assert!(display.contains("open_timeout: 5000ms"));
        assert!(display.contains("read_timeout: 15000ms"));
        assert!(display.contains("allow_private_ips: false"));
    }
}

#[test]
fn configuration_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Configuration>();
}
