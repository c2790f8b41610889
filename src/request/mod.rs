//! Webhook request values and body serialization.
//!
//! Two request variants share the [`RequestBody`] interface:
//! - [`Request`]: raw bodies pass through unchanged; structured bodies
//!   are only encoded for form content types
//! - [`JsonRequest`]: structured bodies are JSON-encoded, raw bodies pass
//!   through unchanged
//!
//! The variant is chosen when the request is built, so the sender never
//! inspects bodies to decide how to encode them.

mod base;
mod body;
mod error;
mod json;

#[cfg(test)]
mod base_tests;

pub use base::{Request, RequestBody};
pub use body::Body;
pub use error::SerializationError;
pub use json::JsonRequest;
