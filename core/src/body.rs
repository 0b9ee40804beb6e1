//! Request body payloads.
//!
//! # Design
//! `Body` is a tagged sum: either `Empty` or a `Payload` trait object that
//! knows its extra headers and how to encode itself. The request builder only
//! reaches `Payload::encode` from the non-empty arm, so an empty body can never
//! be encoded.
//!
//! Encoding is lazy. A payload holds the caller's value and produces bytes
//! only when a request is actually built, which lets encoding failures surface
//! as `BuildError::Encoding` instead of at construction time.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use serde::Serialize;

use crate::error::EncodingError;

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

/// An encodable request payload.
pub trait Payload: Send + Sync {
    /// Headers this payload needs on the request, in order.
    fn additional_headers(&self) -> Vec<(String, String)>;

    /// Encode the payload into raw body bytes.
    fn encode(&self) -> Result<Bytes, EncodingError>;
}

/// The body of an endpoint.
#[derive(Clone, Default)]
pub enum Body {
    #[default]
    Empty,
    Payload(Arc<dyn Payload>),
}

impl Body {
    /// A JSON body serialized with `serde_json` when the request is built.
    pub fn json<T>(value: T) -> Self
    where
        T: Serialize + Send + Sync + 'static,
    {
        Body::Payload(Arc::new(JsonPayload::new(value)))
    }

    /// An `application/x-www-form-urlencoded` body.
    pub fn form<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Body::Payload(Arc::new(FormPayload::new(pairs)))
    }

    /// Caller-encoded bytes sent with the given content type.
    pub fn raw(content_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Body::Payload(Arc::new(RawPayload::new(content_type, bytes)))
    }

    pub fn payload(payload: impl Payload + 'static) -> Self {
        Body::Payload(Arc::new(payload))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Body::Empty)
    }

    /// Extra headers required by the body. Empty for `Body::Empty`.
    pub fn additional_headers(&self) -> Vec<(String, String)> {
        match self {
            Body::Empty => Vec::new(),
            Body::Payload(payload) => payload.additional_headers(),
        }
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Empty => f.write_str("Empty"),
            Body::Payload(payload) => f
                .debug_struct("Payload")
                .field("headers", &payload.additional_headers())
                .finish_non_exhaustive(),
        }
    }
}

/// JSON payload encoded with `serde_json`.
#[derive(Debug, Clone)]
pub struct JsonPayload<T> {
    value: T,
}

impl<T> JsonPayload<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }
}

impl<T: Serialize + Send + Sync> Payload for JsonPayload<T> {
    fn additional_headers(&self) -> Vec<(String, String)> {
        vec![("content-type".to_string(), CONTENT_TYPE_JSON.to_string())]
    }

    fn encode(&self) -> Result<Bytes, EncodingError> {
        serde_json::to_vec(&self.value)
            .map(Bytes::from)
            .map_err(EncodingError::new)
    }
}

/// URL-encoded form payload. Pair order and duplicate keys are kept.
#[derive(Debug, Clone)]
pub struct FormPayload {
    pairs: Vec<(String, String)>,
}

impl FormPayload {
    pub fn new<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Payload for FormPayload {
    fn additional_headers(&self) -> Vec<(String, String)> {
        vec![("content-type".to_string(), CONTENT_TYPE_FORM.to_string())]
    }

    fn encode(&self) -> Result<Bytes, EncodingError> {
        let encoded = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.pairs)
            .finish();
        Ok(Bytes::from(encoded))
    }
}

/// Bytes the caller already encoded.
#[derive(Debug, Clone)]
pub struct RawPayload {
    content_type: String,
    bytes: Bytes,
}

impl RawPayload {
    pub fn new(content_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }
}

impl Payload for RawPayload {
    fn additional_headers(&self) -> Vec<(String, String)> {
        vec![("content-type".to_string(), self.content_type.clone())]
    }

    fn encode(&self) -> Result<Bytes, EncodingError> {
        Ok(self.bytes.clone())
    }
}
