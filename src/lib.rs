//! ActionHook: signed outbound webhook delivery.
//!
//! A library for building HMAC-signed HTTP webhook requests, serializing
//! their bodies by content type, and delivering them over a pluggable
//! transport with explicit connect and read timeouts.

pub mod config;
pub mod error;
pub mod request;
pub mod security;
pub mod sender;
pub mod time;
pub mod transport;

pub use config::{Configuration, NetHttpOptions};
pub use error::{Error, ErrorKind};
pub use request::{Body, JsonRequest, Request, RequestBody};
pub use security::{Authenticator, Credential};
pub use sender::{DeliveryResult, Sender};
