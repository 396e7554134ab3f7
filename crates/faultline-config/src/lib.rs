#![allow(clippy::must_use_candidate)]

mod env;
pub mod health;
mod loader;
pub mod probe;
pub mod server;
pub mod telemetry;

use serde::Deserialize;

pub use env::ExpandError;
pub use health::*;
pub use probe::*;
pub use server::*;
pub use telemetry::{LogFormat, SamplingConfig, TelemetryConfig};

/// Top-level Faultline configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging and tracing configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}
