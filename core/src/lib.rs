//! Generic HTTP request pipeline.
//!
//! # Overview
//! Turns a declarative [`Endpoint`] into a [`WireRequest`], sends it through a
//! pluggable [`Transport`], validates the response and decodes the body into
//! a caller-chosen type. The same pipeline is offered in three shapes on
//! [`ApiClient`]: an `async fn` (`fetch`), a single-item stream
//! (`fetch_stream`) and a callback (`fetch_with`).
//!
//! # Design
//! - `request::build` is pure; nothing is dispatched if it fails.
//! - `response::validate_and_decode` is the single classification point, so
//!   every shape reports the same `ApiError` for the same fault.
//! - `ApiClient` is an ordinary value holding its transport and codec; tests
//!   swap in in-memory transports instead of touching the network.
//! - `ReqwestTransport` (feature `reqwest`, on by default) is the production
//!   transport.

pub mod body;
pub mod client;
pub mod codec;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod request;
pub mod response;
pub mod transport;
pub mod wire;

pub use body::{Body, FormPayload, JsonPayload, Payload, RawPayload};
pub use client::{ApiClient, ApiClientBuilder};
pub use codec::{Codec, JsonCodec};
pub use config::TransportConfig;
pub use endpoint::{Endpoint, EndpointDescriptor};
pub use error::{ApiError, BuildError, DecodeError, EncodingError, Outcome, TransportError};
pub use request::build;
pub use response::validate_and_decode;
#[cfg(feature = "reqwest")]
pub use transport::ReqwestTransport;
pub use transport::Transport;
pub use wire::{RawResponse, WireRequest};

pub use http::Method;
