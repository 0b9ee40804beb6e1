//! Transport abstraction.
//!
//! This module decouples the pipeline from any specific HTTP implementation.
//! A transport sends one `WireRequest` and returns the raw status and body.
//! HTTP error statuses are data, not errors: only failures that prevented a
//! response (DNS, TLS, connection reset, timeout, unreadable body) belong in
//! the `Err` arm.
//!
//! The returned future is the only primitive a transport provides. Dropping it
//! cancels the request; the client derives its callback and stream shapes
//! from it.

#[cfg(feature = "reqwest")]
mod reqwest_transport;

use std::future::Future;

use crate::error::TransportError;
use crate::wire::{RawResponse, WireRequest};

#[cfg(feature = "reqwest")]
pub use reqwest_transport::ReqwestTransport;

/// Sends wire requests.
pub trait Transport: Send + Sync + 'static {
    /// Execute `request` and return the raw response.
    ///
    /// Must be safe to call concurrently from many tasks.
    fn execute(
        &self,
        request: WireRequest,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send;
}
