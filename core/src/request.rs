//! Turns an `Endpoint` into a `WireRequest`.
//!
//! # Design
//! `build` is a pure function: it reads the endpoint, allocates a fresh
//! request and either returns it whole or fails before anything is handed to
//! a transport. It never touches shared state, so concurrent calls need no
//! coordination.
//!
//! Header semantics differ on purpose between the two sources. Endpoint
//! headers are *set* (`HeaderMap::insert`, last write wins) while the body's
//! additional headers are *added* (`HeaderMap::append`), so a body header with
//! the same name as an endpoint header sits next to it instead of replacing it.

use http::header::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::body::Body;
use crate::endpoint::Endpoint;
use crate::error::BuildError;
use crate::wire::WireRequest;

/// Build the wire request described by `endpoint`.
pub fn build(endpoint: &(impl Endpoint + ?Sized)) -> Result<WireRequest, BuildError> {
    let url = resolve_url(endpoint)?;

    let mut headers = HeaderMap::new();
    if let Some(entries) = endpoint.headers() {
        for (name, value) in entries {
            let (name, value) = header_pair(&name, &value)?;
            headers.insert(name, value);
        }
    }

    let body = match endpoint.body() {
        Body::Empty => None,
        Body::Payload(payload) => {
            for (name, value) in payload.additional_headers() {
                let (name, value) = header_pair(&name, &value)?;
                headers.append(name, value);
            }
            let bytes = payload.encode().inspect_err(|err| {
                tracing::debug!(error = %err, "request body failed to encode");
            })?;
            Some(bytes)
        }
    };

    Ok(WireRequest::new(url, endpoint.method(), headers, body))
}

fn resolve_url(endpoint: &(impl Endpoint + ?Sized)) -> Result<Url, BuildError> {
    let joined = format!("{}{}", endpoint.base_url(), endpoint.path());
    let mut url = Url::parse(&joined).map_err(|err| {
        tracing::debug!(url = %joined, error = %err, "endpoint path does not parse");
        BuildError::InvalidPath {
            url: joined.clone(),
        }
    })?;

    if let Some(queries) = endpoint.queries() {
        if queries.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut().clear().extend_pairs(&queries);
        }
    }

    // Only absolute http(s) URLs with a host can be dispatched.
    if !matches!(url.scheme(), "http" | "https") || url.host().is_none() {
        tracing::debug!(url = %url, "resolved url is not dispatchable");
        return Err(BuildError::InvalidUrl {
            url: url.to_string(),
        });
    }

    Ok(url)
}

fn header_pair(name: &str, value: &str) -> Result<(HeaderName, HeaderValue), BuildError> {
    let invalid = || BuildError::InvalidHeader {
        name: name.to_string(),
    };
    let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
    let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;
    Ok((header_name, header_value))
}
