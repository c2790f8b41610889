//! HMAC-SHA256 request signing.
//!
//! # Canonical payload
//!
//! The bytes fed to the MAC are fixed per [`SigningScheme`] and must stay
//! stable, since receivers recompute them to verify a delivery:
//!
//! - [`SigningScheme::Body`]: the serialized body, byte for byte.
//! - [`SigningScheme::Timestamped`]: `"{timestamp}.{body}"`, where
//!   `timestamp` is the value the caller put in the named request header.
//!
//! The signature is the lowercase hex encoding of the 32-byte MAC.

use std::borrow::Cow;

use hmac::{Hmac, Mac};
use http::{HeaderMap, HeaderName, HeaderValue};
use sha2::Sha256;

use crate::config::defaults;

use super::{AuthenticationError, Credential};

type HmacSha256 = Hmac<Sha256>;

/// Computes the hex HMAC-SHA256 of `payload` under `secret`.
///
/// Pure and deterministic: identical inputs always yield the same
/// signature.
///
/// # Errors
///
/// Returns [`AuthenticationError::EmptySecret`] if `secret` is empty.
///
/// # Example
///
/// ```
/// use actionhook::security::sign;
///
/// let a = sign(b"s3cr3t", br#"{"event":"ping"}"#).unwrap();
/// let b = sign(b"s3cr3t", br#"{"event":"ping"}"#).unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.len(), 64);
/// ```
pub fn sign(secret: &[u8], payload: &[u8]) -> Result<String, AuthenticationError> {
    if secret.is_empty() {
        return Err(AuthenticationError::EmptySecret);
    }

    let mut mac =
        HmacSha256::new_from_slice(secret).map_err(|_| AuthenticationError::InvalidKey)?;
    mac.update(payload);

    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Which bytes of a request the signature covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SigningScheme {
    /// Sign the serialized body only.
    Body,
    /// Sign `"{timestamp}.{body}"`, reading the timestamp from `header`.
    ///
    /// The caller sets the header; it is sent as-is so the receiver can
    /// rebuild the canonical payload.
    Timestamped {
        /// Request header carrying the timestamp
        header: HeaderName,
    },
}

/// Signs outgoing requests with a shared secret.
///
/// Immutable after construction and freely shared between concurrent
/// deliveries.
///
/// # Example
///
/// ```
/// use actionhook::security::{Authenticator, Credential};
///
/// let authenticator = Authenticator::new();
/// let headers = authenticator
///     .signature_headers(&Credential::from("s3cr3t"), &http::HeaderMap::new(), "{}")
///     .unwrap();
/// assert!(headers.contains_key("x-hook-signature"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authenticator {
    signature_header: HeaderName,
    scheme: SigningScheme,
}

impl Authenticator {
    /// Creates an authenticator signing the body only, writing the
    /// signature to `X-Hook-Signature`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            signature_header: HeaderName::from_static(defaults::SIGNATURE_HEADER),
            scheme: SigningScheme::Body,
        }
    }

    /// Sets the header the signature is written to.
    #[must_use]
    pub fn with_signature_header(mut self, header: HeaderName) -> Self {
        self.signature_header = header;
        self
    }

    /// Sets the signing scheme.
    #[must_use]
    pub fn with_scheme(mut self, scheme: SigningScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Returns the header the signature is written to.
    #[must_use]
    pub const fn signature_header(&self) -> &HeaderName {
        &self.signature_header
    }

    /// Returns the signing scheme.
    #[must_use]
    pub const fn scheme(&self) -> &SigningScheme {
        &self.scheme
    }

    /// Builds the canonical payload for a request with the given headers
    /// and serialized body.
    ///
    /// # Errors
    ///
    /// Returns an error if the timestamped scheme is active and the
    /// timestamp header is missing or not valid text.
    pub fn canonical_payload<'a>(
        &self,
        headers: &HeaderMap,
        body: &'a str,
    ) -> Result<Cow<'a, str>, AuthenticationError> {
        match &self.scheme {
            SigningScheme::Body => Ok(Cow::Borrowed(body)),
            SigningScheme::Timestamped { header } => {
                let value = headers.get(header).ok_or_else(|| {
                    AuthenticationError::MissingTimestamp {
                        header: header.to_string(),
                    }
                })?;
                let timestamp =
                    value
                        .to_str()
                        .map_err(|_| AuthenticationError::InvalidTimestamp {
                            header: header.to_string(),
                        })?;
                Ok(Cow::Owned(format!("{timestamp}.{body}")))
            }
        }
    }

    /// Signs a request body, returning the hex signature.
    ///
    /// # Errors
    ///
    /// Returns an error if the secret is empty or the canonical payload
    /// cannot be built.
    pub fn sign(
        &self,
        credential: &Credential,
        headers: &HeaderMap,
        body: &str,
    ) -> Result<String, AuthenticationError> {
        let canonical = self.canonical_payload(headers, body)?;
        sign(credential.secret(), canonical.as_bytes())
    }

    /// Returns the headers to attach to a request so the receiver can
    /// verify it.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Authenticator::sign`].
    pub fn signature_headers(
        &self,
        credential: &Credential,
        headers: &HeaderMap,
        body: &str,
    ) -> Result<HeaderMap, AuthenticationError> {
        let signature = self.sign(credential, headers, body)?;

        let mut signed = HeaderMap::with_capacity(1);
        signed.insert(
            self.signature_header.clone(),
            HeaderValue::from_str(&signature)?,
        );
        Ok(signed)
    }
}

impl Default for Authenticator {
    fn default() -> Self {
        Self::new()
    }
}
