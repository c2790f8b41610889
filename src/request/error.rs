//! Error types for body serialization.

use thiserror::Error;

/// The body cannot be represented under the declared content type.
///
/// Always raised before any network I/O takes place.
#[derive(Debug, Error)]
pub enum SerializationError {
    /// JSON encoding failed, e.g. a map with non-string keys.
    #[error("Failed to encode JSON body: {0}")]
    Json(#[from] serde_json::Error),

    /// A value meant as a body is neither a mapping, a sequence nor a string.
    #[error("Body must be a mapping, sequence or string, got {kind}")]
    NotStructured {
        /// JSON type of the rejected value
        kind: &'static str,
    },

    /// A structured body has no encoding under this content type.
    #[error("Cannot encode a structured body as '{content_type}'")]
    Unsupported {
        /// The declared content type
        content_type: String,
    },

    /// A form field value is not a string, number or boolean.
    #[error("Form field '{key}' must be a string, number or boolean")]
    UnsupportedFormValue {
        /// The offending field
        key: String,
    },

    /// The content type is not a valid header value.
    #[error("Invalid content type '{content_type}'")]
    InvalidContentType {
        /// The declared content type
        content_type: String,
    },
}
