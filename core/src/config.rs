//! Transport configuration.
//!
//! Every field has a default so a partial document (or none at all) yields a
//! usable configuration.

use std::time::Duration;

use serde::Deserialize;

/// Settings for `ReqwestTransport::from_config`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Whole-request timeout. `None` disables it.
    pub timeout_secs: Option<u64>,
    pub connect_timeout_secs: Option<u64>,
    pub user_agent: String,
    pub pool_max_idle_per_host: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout_secs: Some(30),
            connect_timeout_secs: Some(10),
            user_agent: concat!("wirecall/", env!("CARGO_PKG_VERSION")).to_string(),
            pool_max_idle_per_host: 10,
        }
    }
}

impl TransportConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_secs.map(Duration::from_secs)
    }
}
