//! Error types for the request pipeline.
//!
//! # Design
//! `ApiError` is the single failure channel shared by every call shape, so a
//! fault is classified the same way whether the caller used a callback, a
//! stream or an `async fn`. Request-construction failures are kept in their own
//! `BuildError` type because they happen before anything is dispatched.
//!
//! Transport, encoding and decoding errors wrap a boxed source: the pipeline
//! does not care which HTTP library or codec produced them, only that they can
//! be walked through `std::error::Error::source`.

use thiserror::Error;

/// Boxed error used as the source of the wrapper types below.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result of one call: the decoded value or a classified failure.
pub type Outcome<D> = Result<D, ApiError>;

/// Errors delivered by every `ApiClient` call shape.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The endpoint could not be turned into a request. Nothing was sent.
    #[error("failed to build request: {0}")]
    Request(#[from] BuildError),

    /// The transport failed before a response was received.
    #[error("transport failure: {0}")]
    Transport(#[source] TransportError),

    /// A response arrived without a status or with one outside 200-299.
    #[error("unacceptable response status: {}", display_status(.0))]
    Status(Option<u16>),

    /// The status was acceptable but the response carried no body.
    #[error("response carried no data")]
    NoData,

    /// The body could not be decoded into the requested type.
    #[error("failed to decode response body: {0}")]
    Decoding(#[source] DecodeError),
}

impl ApiError {
    /// The HTTP status for `Status` failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status(status) => *status,
            _ => None,
        }
    }

    /// True when the failure happened while building the request.
    pub fn is_request(&self) -> bool {
        matches!(self, ApiError::Request(_))
    }
}

fn display_status(status: &Option<u16>) -> String {
    match status {
        Some(code) => code.to_string(),
        None => "none".to_string(),
    }
}

/// Errors raised while turning an endpoint into a `WireRequest`.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Base URL and path did not concatenate into a parseable URL.
    #[error("invalid endpoint path: {url}")]
    InvalidPath { url: String },

    /// The URL parsed but cannot be dispatched once queries were attached.
    #[error("invalid request url: {url}")]
    InvalidUrl { url: String },

    /// A header name or value is not legal on the wire.
    #[error("invalid header: {name}")]
    InvalidHeader { name: String },

    /// The body payload failed to encode.
    #[error("failed to encode request body: {0}")]
    Encoding(#[from] EncodingError),
}

/// Failure reported by a `Transport` (DNS, TLS, connection reset, timeout...).
#[derive(Debug, Error)]
#[error(transparent)]
pub struct TransportError(BoxError);

impl TransportError {
    pub fn new(source: impl Into<BoxError>) -> Self {
        Self(source.into())
    }

    /// Borrow the underlying error.
    pub fn inner(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.0.as_ref()
    }
}

/// Failure reported by a body payload's encoder.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct EncodingError(BoxError);

impl EncodingError {
    pub fn new(source: impl Into<BoxError>) -> Self {
        Self(source.into())
    }
}

/// Failure reported by a `Codec` while decoding a response body.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct DecodeError(BoxError);

impl DecodeError {
    pub fn new(source: impl Into<BoxError>) -> Self {
        Self(source.into())
    }
}
