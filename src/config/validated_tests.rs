//! Tests for merging CLI and TOML into `ValidatedConfig`.

use super::cli::{Cli, Command, SendArgs};
use super::toml::TomlConfig;
use super::validated::{ValidatedConfig, write_default_config};
use super::{ConfigError, field};
use crate::security::SigningScheme;
use std::time::Duration;

fn send_args(extra: &[&str]) -> SendArgs {
    let mut args = vec!["actionhook", "send", "--data", "x", "--secret", "s"];
    args.extend_from_slice(extra);

    match Cli::try_parse_from_iter(args).unwrap().command {
        Command::Send(args) => args,
        other => panic!("Expected send command, got {other:?}"),
    }
}

fn toml(content: &str) -> TomlConfig {
    TomlConfig::parse(content).unwrap()
}

mod url {
    use super::*;

    #[test]
    fn cli_url_wins_over_toml() {
        let args = send_args(&["--url", "https://cli.example.com/"]);
        let toml = toml("[request]\nurl = \"https://toml.example.com/\"");

        let config = ValidatedConfig::from_raw(&args, Some(&toml)).unwrap();

        assert_eq!(config.url.as_str(), "https://cli.example.com/");
    }

    #[test]
    fn toml_url_used_when_cli_omits_it() {
        let args = send_args(&[]);
        let toml = toml("[request]\nurl = \"https://toml.example.com/\"");

        let config = ValidatedConfig::from_raw(&args, Some(&toml)).unwrap();

        assert_eq!(config.url.as_str(), "https://toml.example.com/");
    }

    #[test]
    fn missing_url_is_an_error() {
        let err = ValidatedConfig::from_raw(&send_args(&[]), None).unwrap_err();

        assert!(matches!(
            err,
            ConfigError::MissingRequired { field: f, .. } if f == field::URL
        ));
    }

    #[test]
    fn invalid_url_is_an_error() {
        let err = ValidatedConfig::from_raw(&send_args(&["--url", "not a url"]), None).unwrap_err();

        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }
}

mod method_and_headers {
    use super::*;

    #[test]
    fn defaults_to_post() {
        let config =
            ValidatedConfig::from_raw(&send_args(&["--url", "https://x.example/"]), None).unwrap();

        assert_eq!(config.method, http::Method::POST);
    }

    #[test]
    fn cli_header_overrides_toml_header() {
        let args = send_args(&["--url", "https://x.example/", "--header", "X-Tenant=cli"]);
        let toml = toml("[request.headers]\nX-Tenant = \"toml\"\nX-Other = \"kept\"");

        let config = ValidatedConfig::from_raw(&args, Some(&toml)).unwrap();

        assert_eq!(config.headers.get("x-tenant").unwrap(), "cli");
        assert_eq!(config.headers.get("x-other").unwrap(), "kept");
    }

    #[test]
    fn malformed_header_is_an_error() {
        let args = send_args(&["--url", "https://x.example/", "--header", "no-separator"]);

        let err = ValidatedConfig::from_raw(&args, None).unwrap_err();

        assert!(matches!(err, ConfigError::InvalidHeader { .. }));
    }

    #[test]
    fn invalid_method_is_an_error() {
        let args = send_args(&["--url", "https://x.example/", "--method", "BAD METHOD"]);

        let err = ValidatedConfig::from_raw(&args, None).unwrap_err();

        assert!(matches!(err, ConfigError::InvalidMethod(_)));
    }

    #[test]
    fn content_type_falls_back_to_toml() {
        let args = send_args(&["--url", "https://x.example/"]);
        let toml = toml("[request]\ncontent_type = \"text/plain\"");

        let config = ValidatedConfig::from_raw(&args, Some(&toml)).unwrap();

        assert_eq!(config.content_type.as_deref(), Some("text/plain"));
    }
}

mod transport {
    use super::*;

    #[test]
    fn cli_timeouts_win_over_toml() {
        let args = send_args(&["--url", "https://x.example/", "--open-timeout", "2"]);
        let toml = toml("[transport]\nopen_timeout = 7\nread_timeout = 40");

        let config = ValidatedConfig::from_raw(&args, Some(&toml)).unwrap();
        let options = config.configuration.net_http_options();

        assert_eq!(options.open_timeout, Duration::from_secs(2));
        assert_eq!(options.read_timeout, Duration::from_secs(40));
    }

    #[test]
    fn zero_timeout_is_rejected_by_cli() {
        let args = send_args(&["--url", "https://x.example/", "--read-timeout", "0"]);

        let err = ValidatedConfig::from_raw(&args, None).unwrap_err();

        assert!(matches!(
            err,
            ConfigError::InvalidDuration {
                field: "read_timeout",
                ..
            }
        ));
    }

    #[test]
    fn allow_private_ips_uses_or_semantics() {
        let toml = toml("[security]\nallow_private_ips = true");
        let from_toml =
            ValidatedConfig::from_raw(&send_args(&["--url", "https://x.example/"]), Some(&toml))
                .unwrap();
        let from_cli = ValidatedConfig::from_raw(
            &send_args(&["--url", "https://x.example/", "--allow-private-ips"]),
            None,
        )
        .unwrap();

        assert!(from_toml.configuration.destination_policy().allow_private_ips());
        assert!(from_cli.configuration.destination_policy().allow_private_ips());
    }

    #[test]
    fn blocked_ranges_are_parsed() {
        let toml = toml("[security]\nblocked_ip_ranges = [\"203.0.113.0/24\"]");

        let config =
            ValidatedConfig::from_raw(&send_args(&["--url", "https://x.example/"]), Some(&toml))
                .unwrap();

        assert_eq!(
            config.configuration.destination_policy().blocked_ranges(),
            &["203.0.113.0/24".parse::<ipnet::IpNet>().unwrap()]
        );
    }

    #[test]
    fn invalid_blocked_range_is_an_error() {
        let toml = toml("[security]\nblocked_ip_ranges = [\"10.0.0.0/99\"]");

        let err =
            ValidatedConfig::from_raw(&send_args(&["--url", "https://x.example/"]), Some(&toml))
                .unwrap_err();

        assert!(matches!(err, ConfigError::InvalidIpRange { .. }));
    }
}

mod signing {
    use super::*;

    #[test]
    fn body_scheme_by_default() {
        let config =
            ValidatedConfig::from_raw(&send_args(&["--url", "https://x.example/"]), None).unwrap();

        assert_eq!(*config.authenticator.scheme(), SigningScheme::Body);
        assert!(!config.stamp_timestamp);
    }

    #[test]
    fn timestamp_flag_uses_default_header() {
        let config = ValidatedConfig::from_raw(
            &send_args(&["--url", "https://x.example/", "--timestamp"]),
            None,
        )
        .unwrap();

        assert!(config.stamp_timestamp);
        assert_eq!(
            *config.authenticator.scheme(),
            SigningScheme::Timestamped {
                header: http::HeaderName::from_static("x-hook-timestamp"),
            }
        );
    }

    #[test]
    fn configured_headers_are_used() {
        let toml = toml(
            "[security]\nsignature_header = \"X-Signature-256\"\ntimestamp_header = \"X-Sent-At\"",
        );

        let config =
            ValidatedConfig::from_raw(&send_args(&["--url", "https://x.example/"]), Some(&toml))
                .unwrap();

        assert!(config.stamp_timestamp);
        assert_eq!(
            config.authenticator.signature_header().as_str(),
            "x-signature-256"
        );
        assert!(config.to_string().contains("timestamped(x-sent-at)"));
    }
}

mod loading {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_uses_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[request]\nurl = \"https://file.example.com/hooks\"").unwrap();

        let config = ValidatedConfig::load(&send_args(&[]), Some(file.path())).unwrap();

        assert_eq!(config.url.as_str(), "https://file.example.com/hooks");
    }

    #[test]
    fn load_fails_for_missing_explicit_path() {
        let err = ValidatedConfig::load(
            &send_args(&["--url", "https://x.example/"]),
            Some(std::path::Path::new("/nonexistent/actionhook.toml")),
        )
        .unwrap_err();

        assert!(matches!(err, ConfigError::FileRead { .. }));
    }

    #[test]
    fn write_default_config_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let written = write_default_config(Some(&path)).unwrap();

        assert_eq!(written, path);
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(TomlConfig::parse(&content).is_ok());
    }
}
