//! The request interface and the raw request variant.

use std::borrow::Cow;

use http::{HeaderMap, HeaderName, HeaderValue};
use serde_json::{Map, Value};
use url::Url;
use url::form_urlencoded;

use crate::config::defaults;

use super::{Body, SerializationError};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// What the sender needs from a webhook request.
///
/// Implemented by [`Request`] and [`super::JsonRequest`]; each decides
/// how its body is serialized.
pub trait RequestBody: Send + Sync {
    /// Destination URL.
    fn url(&self) -> &Url;

    /// Caller-supplied headers, sent alongside the signature header.
    fn headers(&self) -> &HeaderMap;

    /// Declared content type of the serialized body.
    fn content_type(&self) -> &str;

    /// Serializes the body for the wire.
    ///
    /// A pure function of body and content type: no side effects, same
    /// output for the same request.
    ///
    /// # Errors
    ///
    /// Returns [`SerializationError`] if the body cannot be represented
    /// under the declared content type.
    fn serialized_body(&self) -> Result<Cow<'_, str>, SerializationError>;
}

/// A webhook request with raw body semantics.
///
/// Raw bodies are sent exactly as given. Structured bodies are encoded
/// only when the content type is `application/x-www-form-urlencoded`.
///
/// # Example
///
/// ```
/// use actionhook::{Request, RequestBody};
/// use url::Url;
///
/// let request = Request::new(Url::parse("https://example.com/hooks").unwrap(), "ping")
///     .with_content_type("text/plain");
/// assert_eq!(request.serialized_body().unwrap(), "ping");
/// ```
#[derive(Debug, Clone)]
pub struct Request {
    url: Url,
    headers: HeaderMap,
    body: Body,
    content_type: String,
}

impl Request {
    /// Creates a request with no extra headers and content type
    /// `application/octet-stream`.
    #[must_use]
    pub fn new(url: Url, body: impl Into<Body>) -> Self {
        Self {
            url,
            headers: HeaderMap::new(),
            body: body.into(),
            content_type: defaults::RAW_CONTENT_TYPE.to_string(),
        }
    }

    /// Sets a header, replacing any previous value under the same name.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Sets several headers, replacing previous values under the same names.
    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Sets the content type.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Returns the body.
    #[must_use]
    pub const fn body(&self) -> &Body {
        &self.body
    }
}

impl RequestBody for Request {
    fn url(&self) -> &Url {
        &self.url
    }

    fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn content_type(&self) -> &str {
        &self.content_type
    }

    fn serialized_body(&self) -> Result<Cow<'_, str>, SerializationError> {
        serialize_raw(&self.body, &self.content_type)
    }
}

/// Raw serialization shared by both request variants.
pub(super) fn serialize_raw<'a>(
    body: &'a Body,
    content_type: &str,
) -> Result<Cow<'a, str>, SerializationError> {
    match body {
        Body::Raw(text) => Ok(Cow::Borrowed(text.as_str())),
        Body::Map(map) if media_type(content_type).eq_ignore_ascii_case(FORM_CONTENT_TYPE) => {
            encode_form(map).map(Cow::Owned)
        }
        Body::Map(_) | Body::Seq(_) => Err(SerializationError::Unsupported {
            content_type: content_type.to_string(),
        }),
    }
}

/// Strips parameters such as `; charset=utf-8`.
fn media_type(content_type: &str) -> &str {
    content_type
        .split_once(';')
        .map_or(content_type, |(essence, _)| essence)
        .trim()
}

/// Form-encodes a flat map in insertion order.
fn encode_form(map: &Map<String, Value>) -> Result<String, SerializationError> {
    let mut form = form_urlencoded::Serializer::new(String::new());

    for (key, value) in map {
        let text: Cow<'_, str> = match value {
            Value::String(s) => Cow::Borrowed(s.as_str()),
            Value::Number(n) => Cow::Owned(n.to_string()),
            Value::Bool(b) => Cow::Owned(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => {
                return Err(SerializationError::UnsupportedFormValue { key: key.clone() });
            }
        };
        form.append_pair(key, &text);
    }

    Ok(form.finish())
}
