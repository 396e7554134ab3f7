pub mod exporters;

use std::collections::HashMap;

use serde::Deserialize;

use self::exporters::ExporterConfig;

/// Logging and trace export configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TelemetryConfig {
    /// Service name reported to the trace collector
    #[serde(default = "default_service_name")]
    pub service_name: String,
    /// Additional resource attributes
    #[serde(default)]
    pub resource_attributes: HashMap<String, String>,
    /// `tracing-subscriber` filter directive, `RUST_LOG` takes precedence
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    /// Log line format
    #[serde(default)]
    pub format: LogFormat,
    /// OTLP exporter; spans are only exported when set
    #[serde(default)]
    pub exporter: Option<ExporterConfig>,
    /// Span sampling
    #[serde(default)]
    pub sampling: SamplingConfig,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            resource_attributes: HashMap::new(),
            log_filter: default_log_filter(),
            format: LogFormat::default(),
            exporter: None,
            sampling: SamplingConfig::default(),
        }
    }
}

/// Log line format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Span sampling configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SamplingConfig {
    /// Fraction of traces kept (0.0 to 1.0)
    #[serde(default = "default_rate")]
    pub rate: f64,
    /// Follow the caller's sampling decision when one is propagated
    #[serde(default = "default_true")]
    pub parent_based: bool,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            rate: default_rate(),
            parent_based: true,
        }
    }
}

fn default_service_name() -> String {
    "faultline".to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

const fn default_rate() -> f64 {
    1.0
}

const fn default_true() -> bool {
    true
}
