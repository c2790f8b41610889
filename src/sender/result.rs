//! The outcome of a completed delivery.

use http::{HeaderMap, StatusCode};

use crate::transport::TransportResponse;

/// The response to a delivered webhook.
///
/// Any status counts as delivered, including 4xx and 5xx; check
/// [`DeliveryResult::is_success`] to decide what to do next.
#[derive(Debug, Clone)]
pub struct DeliveryResult {
    /// Response status
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body, with invalid UTF-8 replaced
    pub body: String,
}

impl DeliveryResult {
    /// Returns the numeric status code.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Returns true for 2xx responses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

impl From<TransportResponse> for DeliveryResult {
    fn from(response: TransportResponse) -> Self {
        Self {
            status: response.status,
            headers: response.headers,
            body: String::from_utf8_lossy(&response.body).into_owned(),
        }
    }
}
