//! Response validation and decoding shared by every call shape.
//!
//! # Design
//! Checks run in a fixed order: transport error, status, data presence,
//! decode. Each `ApiClient` shape funnels its transport result through
//! `validate_and_decode`, so a given fault always maps to the same `ApiError`
//! variant regardless of how the caller invoked the client.

use serde::de::DeserializeOwned;

use crate::codec::Codec;
use crate::error::{ApiError, Outcome, TransportError};
use crate::wire::RawResponse;

/// Classify a transport result and decode its body into `D`.
pub fn validate_and_decode<D, C>(
    codec: &C,
    result: Result<RawResponse, TransportError>,
) -> Outcome<D>
where
    D: DeserializeOwned,
    C: Codec,
{
    let response = result.map_err(ApiError::Transport)?;

    match response.status {
        Some(code) if is_acceptable(code) => {}
        status => return Err(ApiError::Status(status)),
    }

    let body = match response.body {
        Some(body) if !body.is_empty() => body,
        _ => return Err(ApiError::NoData),
    };

    codec.decode(&body).map_err(ApiError::Decoding)
}

fn is_acceptable(status: u16) -> bool {
    (200..=299).contains(&status)
}
