//! ActionHook: signed webhook delivery
//!
//! Entry point for the actionhook application.

use actionhook::config::{Cli, Command, SendArgs, SignArgs, ValidatedConfig, write_default_config};
use actionhook::time::SystemClock;
use actionhook::transport::ReqwestTransport;
use std::path::Path;
use std::process::ExitCode;

mod app;
mod run;

use app::{exit_code, print_config_hint, setup_tracing};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();
    setup_tracing(cli.verbose);

    match &cli.command {
        Command::Init { output } => handle_init(output.as_deref()),
        Command::Sign(args) => handle_sign(args),
        Command::Send(args) => handle_send(args, cli.config.as_deref(), cli.verbose),
    }
}

/// Handles the `init` subcommand.
fn handle_init(output: Option<&Path>) -> ExitCode {
    match write_default_config(output) {
        Ok(path) => {
            println!("Configuration template written to: {}", path.display());
            exit_code::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            exit_code::CONFIG_ERROR
        }
    }
}

/// Handles the `sign` subcommand.
fn handle_sign(args: &SignArgs) -> ExitCode {
    match run::sign(args) {
        Ok((header, signature)) => {
            println!("{header}: {signature}");
            exit_code::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            exit_code::CONFIG_ERROR
        }
    }
}

/// Handles the `send` subcommand.
///
/// Excluded from coverage - requires async runtime and network.
#[cfg(not(tarpaulin_include))]
fn handle_send(args: &SendArgs, config_path: Option<&Path>, verbose: bool) -> ExitCode {
    let config = match ValidatedConfig::load(args, config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            print_config_hint(&e);
            return exit_code::CONFIG_ERROR;
        }
    };
    tracing::debug!("{config}");

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to create Tokio runtime: {e}");
            return exit_code::delivery_error();
        }
    };

    let outcome = runtime.block_on(run::send(
        ReqwestTransport::new(),
        config,
        &args.payload,
        &args.secret,
        &SystemClock,
    ));

    match outcome {
        Ok(result) => {
            println!("{}", run::format_result(&result, verbose));
            if result.is_success() {
                exit_code::SUCCESS
            } else {
                exit_code::non_success_status()
            }
        }
        Err(e) if e.is_delivery_failure() => {
            eprintln!("Delivery error: {e}");
            exit_code::delivery_error()
        }
        Err(e) => {
            eprintln!("Error: {e}");
            exit_code::CONFIG_ERROR
        }
    }
}
