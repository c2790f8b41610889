//! Configuration layer for ActionHook.
//!
//! This module provides:
//! - The per-delivery transport settings ([`Configuration`], [`NetHttpOptions`])
//! - The process-wide default ([`global`])
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated `send` settings ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! The `--allow-private-ips` flag uses OR semantics: set in either source,
//! it is enabled.
//!
//! # Validation
//!
//! [`Configuration`] itself is permissive: a zero timeout passes through
//! to the transport unchanged. [`Configuration::validate`] rejects it and
//! is applied by the CLI when building [`ValidatedConfig`].

mod cli;
mod configuration;
pub mod defaults;
mod error;
pub mod global;
mod toml;
mod validated;

#[cfg(test)]
mod configuration_tests;
#[cfg(test)]
mod validated_tests;

pub use cli::{Cli, Command, PayloadArgs, SendArgs, SignArgs};
pub use configuration::{Configuration, ConfigurationOptions, NetHttpOptions};
pub use error::{ConfigError, field};
pub use toml::{TomlConfig, default_config_path, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
