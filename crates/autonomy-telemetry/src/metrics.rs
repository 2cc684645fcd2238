//! Prometheus metrics for the vehicle actors.
//!
//! All metrics follow the naming convention: `ci_<component>_<metric>_<unit>`
//! and live in the default registry.

use lazy_static::lazy_static;
use prometheus::{
    register_int_counter, register_int_counter_vec, Encoder, IntCounter, IntCounterVec,
    TextEncoder,
};

use crate::TelemetryError;

lazy_static! {
    // =========================================================================
    // SECURITY MONITOR
    // =========================================================================

    /// Events whose triple matched a policy and were forwarded
    pub static ref MONITOR_EVENTS_AUTHORIZED: IntCounter = register_int_counter!(
        "ci_monitor_events_authorized_total",
        "Events authorized and forwarded by the security monitor"
    ).expect("metric creation failed");

    /// Events dropped for lack of a matching policy
    pub static ref MONITOR_EVENTS_DENIED: IntCounterVec = register_int_counter_vec!(
        "ci_monitor_events_denied_total",
        "Events denied by the security monitor",
        &["source", "operation"]
    ).expect("metric creation failed");

    // =========================================================================
    // BUS / RUNTIME
    // =========================================================================

    /// Events dropped because their destination mailbox could not be resolved
    pub static ref BUS_EVENTS_UNDELIVERABLE: IntCounterVec = register_int_counter_vec!(
        "ci_bus_events_undeliverable_total",
        "Events dropped because the destination is not registered or closed",
        &["destination"]
    ).expect("metric creation failed");

    /// Handler invocations that returned an error or panicked
    pub static ref ACTOR_HANDLER_FAILURES: IntCounterVec = register_int_counter_vec!(
        "ci_actor_handler_failures_total",
        "Isolated event handling failures",
        &["actor"]
    ).expect("metric creation failed");

    /// Events taken from a mailbox
    pub static ref ACTOR_EVENTS_PROCESSED: IntCounterVec = register_int_counter_vec!(
        "ci_actor_events_processed_total",
        "Events drained from actor mailboxes",
        &["actor"]
    ).expect("metric creation failed");

    // =========================================================================
    // CONTROL / SAFETY
    // =========================================================================

    /// Actuation commands withheld by the cargo-weight interlock
    pub static ref CONTROL_COMMANDS_SUPPRESSED: IntCounter = register_int_counter!(
        "ci_control_commands_suppressed_total",
        "Speed/direction emissions withheld because the vehicle is overloaded"
    ).expect("metric creation failed");

    /// Waypoints reached, by the component tracking the route
    pub static ref ROUTE_WAYPOINTS_REACHED: IntCounterVec = register_int_counter_vec!(
        "ci_route_waypoints_reached_total",
        "Route advances",
        &["actor"]
    ).expect("metric creation failed");

    /// Actuation requests refused by the safety block
    pub static ref SAFETY_REJECTIONS: IntCounterVec = register_int_counter_vec!(
        "ci_safety_rejections_total",
        "Actuation requests rejected by the safety block",
        &["reason"]  // reason: emergency_stop/negative_speed/non_finite_speed/non_finite_direction/unsafe_direction
    ).expect("metric creation failed");

    /// Speed requests above the ceiling that were clamped
    pub static ref SAFETY_SPEED_CLAMPS: IntCounter = register_int_counter!(
        "ci_safety_speed_clamps_total",
        "Speed requests clamped to the safety ceiling"
    ).expect("metric creation failed");
}

/// Encode all metrics as Prometheus text format.
pub fn gather_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsEncode(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsEncode(e.to_string()))
}
