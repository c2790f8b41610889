//! Process-wide default configuration.
//!
//! The default is installed at most once, typically at startup. Until
//! then, [`configuration`] returns [`Configuration::new`]. Deliveries
//! take an explicit `Option<&Configuration>` that wins over the default.

use std::sync::OnceLock;

use super::{ConfigError, Configuration};

static INSTALLED: OnceLock<Configuration> = OnceLock::new();
static DEFAULT: Configuration = Configuration::new();

/// Installs the process-wide configuration.
///
/// # Errors
///
/// Returns [`ConfigError::AlreadyInstalled`] if a configuration was
/// installed before. The earlier one stays in effect.
pub fn install(configuration: Configuration) -> Result<(), ConfigError> {
    INSTALLED
        .set(configuration)
        .map_err(|_| ConfigError::AlreadyInstalled)
}

/// Returns the installed configuration, or the built-in default.
#[must_use]
pub fn configuration() -> &'static Configuration {
    INSTALLED.get().unwrap_or(&DEFAULT)
}

/// Returns `explicit` when given, otherwise the process-wide configuration.
#[must_use]
pub fn resolve(explicit: Option<&Configuration>) -> &Configuration {
    match explicit {
        Some(explicit) => explicit,
        None => configuration(),
    }
}
