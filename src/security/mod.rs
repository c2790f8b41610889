//! Request signing and destination checks.
//!
//! This module provides:
//! - The shared secret a webhook is signed with ([`Credential`])
//! - HMAC-SHA256 signing over a fixed canonical payload ([`Authenticator`], [`sign`])
//! - Filtering of destinations that resolve to internal networks ([`DestinationPolicy`])

mod authentication;
mod credential;
mod destination;
mod error;

#[cfg(test)]
mod destination_tests;

pub use authentication::{Authenticator, SigningScheme, sign};
pub use credential::Credential;
pub use destination::DestinationPolicy;
pub use error::{AuthenticationError, DestinationError};
