//! Subcommand execution.
//!
//! Turns parsed arguments into requests, delivers or signs them, and
//! formats the outcome for the terminal.

use std::fmt::Write as _;

use http::{HeaderMap, HeaderName, HeaderValue};
use thiserror::Error;
use url::Url;

use actionhook::config::{ConfigError, PayloadArgs, SignArgs, ValidatedConfig, defaults};
use actionhook::security::SigningScheme;
use actionhook::time::{Clock, unix_seconds};
use actionhook::transport::Transport;
use actionhook::{
    Authenticator, Body, Credential, DeliveryResult, ErrorKind, JsonRequest, Request,
    RequestBody, Sender,
};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for subcommand failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Arguments or configuration were rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The library refused or failed the operation.
    #[error(transparent)]
    Hook(#[from] actionhook::Error),
}

impl RunError {
    /// Returns true if the failure happened on the network, after the
    /// request was fully built.
    #[must_use]
    pub fn is_delivery_failure(&self) -> bool {
        match self {
            Self::Config(_) => false,
            Self::Hook(error) => !matches!(
                error.kind(),
                ErrorKind::Serialization | ErrorKind::Authentication | ErrorKind::Configuration
            ),
        }
    }
}

/// A request built from CLI payload arguments.
#[derive(Debug)]
enum Outgoing {
    Json(JsonRequest),
    Raw(Request),
}

impl Outgoing {
    /// Builds the request for `payload`.
    ///
    /// `--json` produces a JSON request, `--data` a raw one. A content
    /// type override applies to either.
    fn build(
        url: Url,
        payload: &PayloadArgs,
        content_type: Option<&str>,
        headers: HeaderMap,
    ) -> Result<Self, ConfigError> {
        let outgoing = match (&payload.json, &payload.data) {
            (Some(json), _) => {
                let mut request = JsonRequest::new(url, parse_json_body(json)?).with_headers(headers);
                if let Some(content_type) = content_type {
                    request = request.with_content_type(content_type);
                }
                Self::Json(request)
            }
            (None, Some(data)) => {
                let mut request = Request::new(url, data.as_str()).with_headers(headers);
                if let Some(content_type) = content_type {
                    request = request.with_content_type(content_type);
                }
                Self::Raw(request)
            }
            (None, None) => {
                return Err(ConfigError::InvalidPayload {
                    reason: "Either --json or --data is required".to_string(),
                });
            }
        };
        Ok(outgoing)
    }

    fn serialized_body(&self) -> Result<String, actionhook::Error> {
        let body = match self {
            Self::Json(request) => request.serialized_body()?,
            Self::Raw(request) => request.serialized_body()?,
        };
        Ok(body.into_owned())
    }
}

fn parse_json_body(json: &str) -> Result<Body, ConfigError> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| ConfigError::InvalidPayload {
            reason: format!("--json is not valid JSON: {e}"),
        })?;

    Body::from_value(value).map_err(|e| ConfigError::InvalidPayload {
        reason: e.to_string(),
    })
}

/// Returns the header the timestamp goes in, if the scheme signs one.
fn timestamp_header(authenticator: &Authenticator) -> Option<&HeaderName> {
    match authenticator.scheme() {
        SigningScheme::Timestamped { header } => Some(header),
        SigningScheme::Body => None,
    }
}

/// Executes the `send` subcommand against `transport`.
///
/// # Errors
///
/// Returns an error if the payload is invalid, the request cannot be
/// signed, or delivery fails. Non-2xx responses are returned as results.
pub async fn send<T: Transport>(
    transport: T,
    config: ValidatedConfig,
    payload: &PayloadArgs,
    secret: &str,
    clock: &impl Clock,
) -> Result<DeliveryResult, RunError> {
    let mut headers = config.headers.clone();
    if let Some(header) = timestamp_header(&config.authenticator).filter(|_| config.stamp_timestamp) {
        headers.insert(header.clone(), HeaderValue::from(unix_seconds(clock)));
    }

    let outgoing = Outgoing::build(
        config.url.clone(),
        payload,
        config.content_type.as_deref(),
        headers,
    )?;

    let sender = Sender::new(transport)
        .with_method(config.method.clone())
        .with_authenticator(config.authenticator.clone());
    let credential = Credential::from(secret);
    let configuration = Some(&config.configuration);

    let result = match &outgoing {
        Outgoing::Json(request) => sender.deliver(request, &credential, configuration).await,
        Outgoing::Raw(request) => sender.deliver(request, &credential, configuration).await,
    }?;

    Ok(result)
}

/// Executes the `sign` subcommand, returning the header name and signature.
///
/// # Errors
///
/// Returns an error if the payload is invalid, the timestamp is not a
/// valid header value, or signing fails.
pub fn sign(args: &SignArgs) -> Result<(HeaderName, String), RunError> {
    let mut authenticator = Authenticator::new();
    let mut headers = HeaderMap::new();

    if let Some(timestamp) = &args.timestamp {
        let header = HeaderName::from_static(defaults::TIMESTAMP_HEADER);
        let value =
            HeaderValue::from_str(timestamp).map_err(|e| ConfigError::InvalidHeaderValue {
                name: header.to_string(),
                reason: e.to_string(),
            })?;
        headers.insert(header.clone(), value);
        authenticator = authenticator.with_scheme(SigningScheme::Timestamped { header });
    }

    // The URL is never contacted; it only completes the request value.
    let url = Url::parse("http://localhost/").map_err(|e| ConfigError::InvalidUrl {
        url: "http://localhost/".to_string(),
        reason: e.to_string(),
    })?;
    let body = Outgoing::build(url, &args.payload, None, HeaderMap::new())?.serialized_body()?;

    let signature = authenticator
        .sign(&Credential::from(args.secret.as_str()), &headers, &body)
        .map_err(actionhook::Error::from)?;

    Ok((authenticator.signature_header().clone(), signature))
}

/// Formats a delivery result for the terminal.
///
/// The status line always comes first; headers are listed only when
/// `verbose` is set. The body follows when non-empty.
#[must_use]
pub fn format_result(result: &DeliveryResult, verbose: bool) -> String {
    let mut out = format!("HTTP {}", result.status);

    if verbose {
        for (name, value) in &result.headers {
            let _ = write!(out, "\n{name}: {}", value.to_str().unwrap_or("<binary>"));
        }
    }

    if !result.body.is_empty() {
        out.push_str("\n\n");
        out.push_str(&result.body);
    }

    out
}
