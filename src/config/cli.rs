//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// ActionHook: signed webhook delivery
///
/// Builds HMAC-signed HTTP requests and delivers them with explicit
/// connect and read timeouts.
#[derive(Debug, Parser)]
#[command(name = "actionhook")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Path to TOML configuration file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign and deliver a webhook
    Send(SendArgs),

    /// Print the signature a delivery would carry, without sending
    Sign(SignArgs),

    /// Generate a configuration file template
    Init {
        /// Output file path (defaults to the platform config location)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
}

/// The webhook body, given as JSON or as raw text.
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct PayloadArgs {
    /// JSON body; objects and arrays are sent as `application/json`
    #[arg(long)]
    pub json: Option<String>,

    /// Raw body, sent unchanged
    #[arg(long)]
    pub data: Option<String>,
}

/// Arguments of the `send` subcommand.
#[derive(Debug, Args)]
pub struct SendArgs {
    /// Webhook URL (falls back to request.url in the config file)
    #[arg(long)]
    pub url: Option<String>,

    #[command(flatten)]
    pub payload: PayloadArgs,

    /// Shared signing secret
    #[arg(long, env = "ACTIONHOOK_SECRET", hide_env_values = true)]
    pub secret: String,

    /// HTTP method for the webhook request
    #[arg(long)]
    pub method: Option<String>,

    /// HTTP headers in 'Key=Value' or 'Key: Value' format (can be specified multiple times)
    #[arg(long = "header", value_name = "K=V")]
    pub headers: Vec<String>,

    /// Content type for --data payloads
    #[arg(long = "content-type")]
    pub content_type: Option<String>,

    /// Connect timeout in seconds
    #[arg(long = "open-timeout")]
    pub open_timeout: Option<u64>,

    /// Read timeout in seconds
    #[arg(long = "read-timeout")]
    pub read_timeout: Option<u64>,

    /// Permit destinations in loopback, private or link-local address space
    #[arg(long = "allow-private-ips")]
    pub allow_private_ips: bool,

    /// Stamp the current Unix time into the timestamp header and sign over it
    #[arg(long)]
    pub timestamp: bool,
}

/// Arguments of the `sign` subcommand.
#[derive(Debug, Args)]
pub struct SignArgs {
    #[command(flatten)]
    pub payload: PayloadArgs,

    /// Shared signing secret
    #[arg(long, env = "ACTIONHOOK_SECRET", hide_env_values = true)]
    pub secret: String,

    /// Sign over "{timestamp}.{body}" using this timestamp
    #[arg(long)]
    pub timestamp: Option<String>,
}

impl Cli {
    /// Parses command-line arguments.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses arguments from an iterator (for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if argument parsing fails.
    pub fn try_parse_from_iter<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(iter)
    }
}
