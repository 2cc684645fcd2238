//! # Cyber-Immune Vehicle Runtime
//!
//! Starts every component of the delivery vehicle and runs the configured
//! mission against the simulator.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (defaults, then `CI_*` environment overrides)
//! 2. Install logging with per-component verbosity
//! 3. Build the vehicle (all mailboxes registered, mission queued)
//! 4. Start every component
//! 5. Run for the configured duration or until Ctrl+C
//! 6. Stop and join every component

use anyhow::{Context, Result};
use autonomy_telemetry::{init_telemetry, TelemetryConfig};
use tracing::{info, warn};

use vehicle_runtime::{VehicleConfig, VehicleSystem};

#[tokio::main]
async fn main() -> Result<()> {
    let config = VehicleConfig::from_env();

    let mut telemetry = TelemetryConfig::from_env();
    telemetry
        .component_levels
        .extend(config.components.log_directives());
    let _telemetry = init_telemetry(&telemetry).context("Cannot initialise logging")?;

    info!("===========================================");
    info!("  Cyber-Immune Vehicle v{}", env!("CARGO_PKG_VERSION"));
    info!("  Topology: {}", config.topology);
    info!("===========================================");

    let run_for = config.run.duration;
    let mut system = VehicleSystem::build(config)?;
    system.start();

    match run_for {
        Some(duration) => {
            info!(secs = duration.as_secs(), "Running");
            tokio::select! {
                _ = tokio::time::sleep(duration) => info!("Run time elapsed"),
                _ = tokio::signal::ctrl_c() => info!("Interrupted"),
            }
        }
        None => {
            info!("Running. Press Ctrl+C to stop.");
            tokio::signal::ctrl_c().await?;
        }
    }

    let status = system.status().clone();
    system.stop().await.context("Shutdown incomplete")?;

    let control = serde_json::to_string(&*status.control.borrow())?;
    let vehicle = serde_json::to_string(&*status.vehicle.borrow())?;
    let cargo = *status.cargo.borrow();
    info!(%control, %vehicle, %cargo, "Final state");
    if let Some(stats) = system.monitor_stats() {
        info!(
            forwarded = stats.forwarded(),
            denied = stats.denied(),
            undeliverable = stats.undeliverable(),
            "Security monitor"
        );
        if stats.denied() > 0 {
            warn!("Unauthorized events were blocked during the run");
        }
    }
    Ok(())
}
