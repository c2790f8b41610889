//! Application startup and utilities.
//!
//! Exit codes, tracing setup and error hints for the entry point.

use actionhook::config::{ConfigError, field};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration or usage error (exit code 1) - invalid args, bad payload, empty secret.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Delivery error (exit code 2) - blocked destination, timeout, connection failure.
    ///
    /// Note: This is a function rather than a constant because `ExitCode::from()` is not `const fn`.
    pub fn delivery_error() -> ExitCode {
        ExitCode::from(2)
    }

    /// The endpoint answered with a non-2xx status (exit code 3).
    pub fn non_success_status() -> ExitCode {
        ExitCode::from(3)
    }
}

/// Prints helpful hints for common configuration errors.
pub fn print_config_hint(error: &ConfigError) {
    match error {
        ConfigError::MissingRequired { field: f, .. } if *f == field::URL => {
            eprintln!("\nRun 'actionhook init' to generate a configuration template.");
        }
        ConfigError::FileRead { .. } => {
            eprintln!("\nRun 'actionhook init' to generate a configuration template.");
        }
        _ => {}
    }
}

/// Sets up the tracing subscriber for logging.
///
/// Logs go to stderr so stdout carries only command output.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
