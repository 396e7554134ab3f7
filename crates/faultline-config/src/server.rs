use std::net::SocketAddr;

use faultline_core::Environment;
use serde::Deserialize;

use crate::{health::HealthConfig, probe::ErrorProbeConfig};

/// Default request body limit, 2 MiB
pub const DEFAULT_BODY_LIMIT: usize = 2 * 1024 * 1024;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub listen_address: Option<SocketAddr>,
    /// `development` exposes error diagnostics in responses
    #[serde(default)]
    pub environment: Environment,
    /// Largest accepted request body in bytes
    #[serde(default = "default_body_limit")]
    pub request_body_limit: usize,
    #[serde(default)]
    pub health: HealthConfig,
    #[serde(default)]
    pub error_probe: ErrorProbeConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: None,
            environment: Environment::default(),
            request_body_limit: DEFAULT_BODY_LIMIT,
            health: HealthConfig::default(),
            error_probe: ErrorProbeConfig::default(),
        }
    }
}

const fn default_body_limit() -> usize {
    DEFAULT_BODY_LIMIT
}
