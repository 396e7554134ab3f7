//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use faultline_config::{Config, ServerConfig};
use faultline_core::Environment;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Production defaults on a loopback address
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    ..ServerConfig::default()
                },
                ..Config::default()
            },
        }
    }

    pub fn development(mut self) -> Self {
        self.config.server.environment = Environment::Development;
        self
    }

    /// Mount the error probe under `/errors`
    pub fn with_probe(mut self) -> Self {
        self.config.server.error_probe.enabled = true;
        self
    }

    pub fn with_body_limit(mut self, limit: usize) -> Self {
        self.config.server.request_body_limit = limit;
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
