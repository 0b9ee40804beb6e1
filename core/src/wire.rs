//! Wire-level request and response types.
//!
//! # Design
//! These types describe one HTTP exchange as plain data. `WireRequest` is
//! produced by `request::build` and consumed by a `Transport`; `RawResponse`
//! is what a transport hands back before any validation. Neither type knows
//! about decoding or error classification.
//!
//! `WireRequest` exposes read-only accessors only: once built it is a frozen
//! snapshot that can be moved to a transport running on any thread.

use bytes::Bytes;
use http::{HeaderMap, Method};
use url::Url;

/// A concrete, ready-to-send HTTP request.
#[derive(Debug, Clone)]
pub struct WireRequest {
    url: Url,
    method: Method,
    headers: HeaderMap,
    body: Option<Bytes>,
}

impl WireRequest {
    pub(crate) fn new(url: Url, method: Method, headers: HeaderMap, body: Option<Bytes>) -> Self {
        Self {
            url,
            method,
            headers,
            body,
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Split the request into owned parts for a transport to send.
    pub fn into_parts(self) -> (Method, Url, HeaderMap, Option<Bytes>) {
        (self.method, self.url, self.headers, self.body)
    }
}

/// What a transport received, before status or body validation.
///
/// `status` is `None` when the transport produced a response without HTTP
/// status metadata. `body` is `None` when no body was delivered at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawResponse {
    pub status: Option<u16>,
    pub body: Option<Bytes>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status: Some(status),
            body: Some(body.into()),
        }
    }

    /// A response with a status line and no body.
    pub fn without_body(status: u16) -> Self {
        Self {
            status: Some(status),
            body: None,
        }
    }
}
