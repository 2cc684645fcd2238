//! # ci-08-mission-planner
//!
//! Holds the mission of the vehicle and dispatches new missions.
//!
//! A new mission is not applied in place: [`PlannerClient::set_new_mission`]
//! enqueues `set_mission` into the planner's own mailbox, so the mission is
//! taken over on the planner task in arrival order with everything else.
//! Handling it stores the mission, hands it to the communication gateway and,
//! when a fleet-management egress is configured, posts `post_mission` there.

pub mod error;
pub mod service;

pub use error::PlannerError;
pub use service::{MissionPlanner, PlannerClient, PlannerConfig};
