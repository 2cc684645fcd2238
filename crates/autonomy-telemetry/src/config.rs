//! Telemetry configuration from environment variables.

use std::env;

/// Configuration for logging output.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name attached to startup and shutdown lines
    pub service_name: String,

    /// Global log level filter (trace, debug, info, warn, error)
    pub log_level: String,

    /// Per-component overrides as `(tracing target, level)` pairs
    pub component_levels: Vec<(String, String)>,

    /// Whether to enable JSON formatted logs
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "cyber-immune-vehicle".to_string(),
            log_level: "info".to_string(),
            component_levels: Vec::new(),
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `CI_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `CI_JSON_LOGS`: Enable JSON logs (default: false)
    pub fn from_env() -> Self {
        Self {
            log_level: env::var("CI_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),

            json_logs: env::var("CI_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(false),

            ..Self::default()
        }
    }

    /// Override the level of a single component's tracing target.
    pub fn with_component_level(mut self, target: &str, level: &str) -> Self {
        self.component_levels
            .push((target.to_string(), level.to_string()));
        self
    }

    /// `EnvFilter` directive string: the global level followed by each override.
    pub fn filter_directives(&self) -> String {
        let mut directives = vec![self.log_level.clone()];
        directives.extend(
            self.component_levels
                .iter()
                .map(|(target, level)| format!("{target}={level}")),
        );
        directives.join(",")
    }
}
