use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml(&raw)
    }

    /// Load configuration from a file, or use defaults when it does not exist
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`] for files that exist
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            return Self::load(path);
        }

        tracing::debug!(path = %path.display(), "config file not found, using defaults");
        Ok(Self::default())
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing or validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error describing the first inconsistency found
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_routes()?;
        self.validate_limits()?;
        self.validate_telemetry()?;
        Ok(())
    }

    /// Route prefixes must be literal, absolute and must not collide
    fn validate_routes(&self) -> anyhow::Result<()> {
        let health = &self.server.health;
        let probe = &self.server.error_probe;

        if health.enabled {
            check_route_path("server.health.path", &health.path)?;
        }

        if probe.enabled {
            check_route_path("server.error_probe.path", &probe.path)?;
            // `{path}/{kind}` is appended, so `/` or a trailing slash would leave an empty segment
            if probe.path.ends_with('/') {
                anyhow::bail!("server.error_probe.path must not end with '/': {}", probe.path);
            }
            if health.enabled && health.path == probe.path {
                anyhow::bail!("server.health.path and server.error_probe.path must differ");
            }
        }

        Ok(())
    }

    fn validate_limits(&self) -> anyhow::Result<()> {
        if self.server.request_body_limit == 0 {
            anyhow::bail!("server.request_body_limit must be greater than 0");
        }
        Ok(())
    }

    fn validate_telemetry(&self) -> anyhow::Result<()> {
        let rate = self.telemetry.sampling.rate;
        if !(0.0..=1.0).contains(&rate) {
            anyhow::bail!("telemetry.sampling.rate must be between 0.0 and 1.0, got {rate}");
        }
        Ok(())
    }
}

/// A configured path is mounted verbatim, so it may not use route syntax
fn check_route_path(field: &str, path: &str) -> anyhow::Result<()> {
    if !path.starts_with('/') {
        anyhow::bail!("{field} must start with '/': {path}");
    }

    if path.contains(['*', '{', '}']) || path.split('/').any(|segment| segment.starts_with(':')) {
        anyhow::bail!("{field} must be a literal path without wildcards or captures: {path}");
    }

    Ok(())
}
