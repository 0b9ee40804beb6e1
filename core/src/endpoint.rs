//! Declarative endpoint descriptions.
//!
//! Application code describes an HTTP call by implementing [`Endpoint`], or
//! by filling in an [`EndpointDescriptor`]. The pipeline only reads from it.

use http::Method;

use crate::body::Body;

/// Abstract description of an HTTP call.
pub trait Endpoint {
    /// Scheme, host and optional leading path, e.g. `https://api.x.com/`.
    fn base_url(&self) -> &str;

    /// Appended verbatim to `base_url`.
    fn path(&self) -> &str;

    fn method(&self) -> Method;

    /// Query items in order. Duplicate names are allowed and preserved.
    fn queries(&self) -> Option<Vec<(String, String)>> {
        None
    }

    /// Headers set on the request. A later entry for the same name replaces
    /// an earlier one.
    fn headers(&self) -> Option<Vec<(String, String)>> {
        None
    }

    fn body(&self) -> Body {
        Body::Empty
    }
}

/// Plain-data `Endpoint`.
#[derive(Debug, Clone)]
pub struct EndpointDescriptor {
    pub base_url: String,
    pub path: String,
    pub method: Method,
    pub queries: Option<Vec<(String, String)>>,
    pub headers: Option<Vec<(String, String)>>,
    pub body: Body,
}

impl EndpointDescriptor {
    pub fn new(method: Method, base_url: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            path: path.into(),
            method,
            queries: None,
            headers: None,
            body: Body::Empty,
        }
    }

    pub fn get(base_url: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(Method::GET, base_url, path)
    }

    pub fn post(base_url: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(Method::POST, base_url, path)
    }

    /// Append one query item.
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.queries
            .get_or_insert_with(Vec::new)
            .push((name.into(), value.into()));
        self
    }

    /// Append one header entry.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(Vec::new)
            .push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: Body) -> Self {
        self.body = body;
        self
    }
}

impl Endpoint for EndpointDescriptor {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn method(&self) -> Method {
        self.method.clone()
    }

    fn queries(&self) -> Option<Vec<(String, String)>> {
        self.queries.clone()
    }

    fn headers(&self) -> Option<Vec<(String, String)>> {
        self.headers.clone()
    }

    fn body(&self) -> Body {
        self.body.clone()
    }
}
