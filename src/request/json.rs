//! The JSON request variant.

use std::borrow::Cow;

use http::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use url::Url;

use crate::config::defaults;

use super::base::serialize_raw;
use super::{Body, Request, RequestBody, SerializationError};

/// A webhook request that JSON-encodes structured bodies.
///
/// Mappings and sequences are encoded as compact JSON with map keys in
/// insertion order. Raw bodies fall back to [`Request`] behavior and are
/// sent unchanged.
///
/// # Example
///
/// ```
/// use actionhook::{JsonRequest, RequestBody};
/// use url::Url;
///
/// let body = serde_json::json!({"event": "ping"});
/// let request = JsonRequest::from_serialize(
///     Url::parse("https://example.com/hooks").unwrap(),
///     &body,
/// )
/// .unwrap();
/// assert_eq!(request.serialized_body().unwrap(), r#"{"event":"ping"}"#);
/// assert_eq!(request.content_type(), "application/json");
/// ```
#[derive(Debug, Clone)]
pub struct JsonRequest {
    inner: Request,
}

impl JsonRequest {
    /// Creates a request with content type `application/json`.
    #[must_use]
    pub fn new(url: Url, body: impl Into<Body>) -> Self {
        Self {
            inner: Request::new(url, body).with_content_type(defaults::JSON_CONTENT_TYPE),
        }
    }

    /// Creates a request from any serializable value.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Body::from_serialize`].
    pub fn from_serialize<T: Serialize + ?Sized>(
        url: Url,
        value: &T,
    ) -> Result<Self, SerializationError> {
        Ok(Self::new(url, Body::from_serialize(value)?))
    }

    /// Sets a header, replacing any previous value under the same name.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.inner = self.inner.with_header(name, value);
        self
    }

    /// Sets several headers, replacing previous values under the same names.
    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.inner = self.inner.with_headers(headers);
        self
    }

    /// Overrides the content type, e.g. `application/vnd.api+json`.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.inner = self.inner.with_content_type(content_type);
        self
    }

    /// Returns the body.
    #[must_use]
    pub const fn body(&self) -> &Body {
        self.inner.body()
    }
}

impl RequestBody for JsonRequest {
    fn url(&self) -> &Url {
        self.inner.url()
    }

    fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }

    fn content_type(&self) -> &str {
        self.inner.content_type()
    }

    fn serialized_body(&self) -> Result<Cow<'_, str>, SerializationError> {
        match self.inner.body() {
            Body::Map(map) => Ok(Cow::Owned(serde_json::to_string(map)?)),
            Body::Seq(seq) => Ok(Cow::Owned(serde_json::to_string(seq)?)),
            Body::Raw(_) => serialize_raw(self.inner.body(), self.inner.content_type()),
        }
    }
}
