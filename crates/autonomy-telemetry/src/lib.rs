//! # Autonomy Telemetry
//!
//! Logging and metrics for the vehicle actors.
//!
//! ## Components
//!
//! - **Logging**: `tracing-subscriber` with an `EnvFilter` built from a global
//!   level plus one directive per component, so each actor can run at its own
//!   verbosity.
//! - **Metrics**: Prometheus counters for mediation, safety and runtime
//!   failures, rendered as text at shutdown.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use autonomy_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env().with_component_level("ci_03_safety_block", "debug");
//! let _guard = init_telemetry(&config)?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `CI_LOG_LEVEL` / `RUST_LOG` | `info` | Global log level filter |
//! | `CI_JSON_LOGS` | `false` | Emit JSON lines instead of pretty output |

mod config;
pub mod metrics;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use metrics::gather_metrics;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    SubscriberInit(String),

    #[error("Invalid log filter: {0}")]
    Filter(String),

    #[error("Failed to encode metrics: {0}")]
    MetricsEncode(String),
}

/// Install the global subscriber.
///
/// Returns a guard to hold for the lifetime of the application; dropping it
/// logs the final metric snapshot.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    tracing_setup::init_tracing(config)?;
    Ok(TelemetryGuard {
        service_name: config.service_name.clone(),
    })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    service_name: String,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        match gather_metrics() {
            Ok(text) => tracing::info!(service = %self.service_name, "final metrics\n{}", text),
            Err(e) => tracing::warn!(error = %e, "could not render final metrics"),
        }
    }
}

/// Convenience macro for recording a metric increment.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}
