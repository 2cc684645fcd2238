//! # Adapters
//!
//! Edges of the vehicle: mission files coming in, fleet-management telemetry
//! going out.

pub mod mission_import;
pub mod telemetry_egress;
pub mod wpl;

pub use mission_import::{MissionImportError, MissionImporter};
pub use telemetry_egress::{EgressRecord, TelemetryEgress};
pub use wpl::{render_wpl, WplParser};
