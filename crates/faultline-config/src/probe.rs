use serde::Deserialize;

/// Routes that raise any error kind on request
///
/// `GET {path}/{KIND}` responds exactly as a handler raising `KIND` would.
/// Meant for checking client error handling against a real server, so it is
/// off unless enabled.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ErrorProbeConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for ErrorProbeConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_path(),
        }
    }
}

fn default_path() -> String {
    "/errors".to_string()
}
