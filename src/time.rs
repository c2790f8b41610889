//! Clock abstraction for timestamped signing.
//!
//! The library never reads the clock on its own: a caller that signs with
//! [`crate::security::SigningScheme::Timestamped`] stamps the timestamp
//! header itself, usually with [`unix_seconds`] over a [`Clock`].

use std::time::SystemTime;

/// Abstraction over system time for testability.
///
/// Implementations provide the current time, allowing tests to inject
/// controlled time values instead of relying on actual system time.
///
/// # Example
///
/// ```
/// use actionhook::time::{Clock, SystemClock};
///
/// let clock = SystemClock;
/// let now = clock.now();
/// assert!(now >= std::time::SystemTime::UNIX_EPOCH);
/// ```
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> SystemTime;
}

/// Production clock using actual system time.
///
/// This is the default clock implementation that delegates to
/// [`SystemTime::now()`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Returns the clock's current time as whole seconds since the Unix epoch.
///
/// Times before the epoch read as 0.
///
/// # Example
///
/// ```
/// use actionhook::time::{SystemClock, unix_seconds};
///
/// assert!(unix_seconds(&SystemClock) > 1_600_000_000);
/// ```
pub fn unix_seconds(clock: &impl Clock) -> u64 {
    clock
        .now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs())
}
