//! Error types for the translation relay.
//!
//! Each failure mode of the per-event pipeline gets its own variant so
//! callers can branch on kind (metrics, selective retry) instead of matching
//! on message strings.

use thiserror::Error;

/// Failure modes of a single relay invocation, in pipeline order.
#[derive(Error, Debug)]
pub enum RelayError {
    /// Notification event is missing the expected bucket/key fields.
    #[error("malformed notification event: {0}")]
    MalformedEvent(String),

    /// Source object could not be retrieved.
    #[error("failed to read input object {key:?}: {source:#}")]
    InputNotFound {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Source object bytes are not valid UTF-8.
    #[error("input object is not valid UTF-8: {0}")]
    InvalidEncoding(#[from] std::string::FromUtf8Error),

    /// Source object is not a parseable JSON document.
    #[error("input object is not valid JSON: {0}")]
    InvalidStructure(#[from] serde_json::Error),

    /// A required input field is absent or empty.
    #[error("input JSON must contain a non-empty {0:?} field")]
    MissingField(&'static str),

    /// Input text exceeds the translation capability's byte ceiling.
    #[error("text is {size} bytes, exceeding the {limit}-byte limit")]
    PayloadTooLarge { size: usize, limit: usize },

    /// The remote translation call failed for any reason.
    #[error("translation service error: {0:#}")]
    TranslationService(#[source] anyhow::Error),

    /// The destination write failed.
    #[error("failed to write output object {key:?}: {source:#}")]
    OutputWrite {
        key: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Errors surfaced by [`crate::storage::ObjectStore`] implementations.
///
/// Not-found is split out so the handler can report a missing input object
/// distinctly from a storage service fault.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("object not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Service(#[from] anyhow::Error),
}
