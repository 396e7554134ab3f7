use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use faultline_core::Environment;

/// Config file looked up when none is given
pub const DEFAULT_CONFIG: &str = "faultline.toml";

/// Faultline error gateway
#[derive(Debug, Parser)]
#[command(name = "faultline", about = "Serves uniform JSON error responses for HTTP services")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG, env = "FAULTLINE_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "FAULTLINE_LISTEN")]
    pub listen: Option<SocketAddr>,

    /// Override the environment; only `development` exposes diagnostics
    #[arg(long, env = "FAULTLINE_ENV")]
    pub environment: Option<Environment>,
}

impl Args {
    /// Whether the config path was left at its default
    pub fn uses_default_config(&self) -> bool {
        self.config.as_os_str() == DEFAULT_CONFIG
    }
}
