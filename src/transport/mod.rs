//! Transport layer for dispatching signed webhook requests.
//!
//! This module provides types and traits for:
//! - Describing the outbound HTTP call ([`OutboundRequest`])
//! - Capturing what the remote end answered ([`TransportResponse`])
//! - Abstracting HTTP clients ([`Transport`])
//! - Production transport implementation ([`ReqwestTransport`])

mod client;
mod error;
mod guard;
mod http;


pub use client::ReqwestTransport;
pub use error::{TimeoutKind, TransportError};
pub use http::{OutboundRequest, Transport, TransportResponse};
