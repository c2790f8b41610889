//! Webhook delivery.
//!
//! A [`Sender`] serializes a request, signs it, checks its destination and
//! hands it to a [`crate::transport::Transport`] exactly once.

mod dispatch;
mod error;
mod result;


pub use dispatch::Sender;
pub use error::DeliveryError;
pub use result::DeliveryResult;
