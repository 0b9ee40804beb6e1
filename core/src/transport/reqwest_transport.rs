use reqwest::{Client, ClientBuilder};

use super::Transport;
use crate::config::TransportConfig;
use crate::error::TransportError;
use crate::wire::{RawResponse, WireRequest};

/// `Transport` backed by a shared `reqwest::Client`.
///
/// Cloning is cheap and shares the connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a transport from `config`.
    pub fn from_config(config: &TransportConfig) -> Result<Self, TransportError> {
        let mut builder = ClientBuilder::new()
            .user_agent(config.user_agent.clone())
            .pool_max_idle_per_host(config.pool_max_idle_per_host);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout() {
            builder = builder.connect_timeout(timeout);
        }
        let client = builder.build().map_err(TransportError::new)?;
        Ok(Self { client })
    }

    /// Wrap an already configured client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    /// Sends the request and reads the whole body.
    ///
    /// Every status the server answers with is returned as data; only
    /// connection, timeout and body-read failures are errors.
    async fn execute(&self, request: WireRequest) -> Result<RawResponse, TransportError> {
        let (method, url, headers, body) = request.into_parts();
        let mut builder = self.client.request(method, url).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(TransportError::new)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(TransportError::new)?;

        Ok(RawResponse {
            status: Some(status),
            body: Some(body),
        })
    }
}
