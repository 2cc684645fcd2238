//! # Route Progress Tracker
//!
//! Mutable progress over an immutable mission. Pure state machine, no I/O.
//!
//! ## Invariants
//!
//! - `current_index` stays within `[0, len - 1]` and never decreases.
//! - After any [`Route::move_to_next_point`] call, `finished` holds exactly
//!   when `current_index == len - 1`, and never reverts.
//! - Speed limits are sparse: the last limit seen at a reached index persists
//!   until another limit overrides it.
//!
//! ```text
//!  [0] ──arrive──→ [1] ──arrive──→ ... ──arrive──→ [len-1, FINISHED]
//!                                                      │    ↑
//!                                                      └────┘ move_to_next_point() = false
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::entities::{GeoPoint, Mission, SpeedLimit};
use crate::errors::RouteError;
use crate::geo;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    points: Vec<GeoPoint>,
    speed_limits: Vec<SpeedLimit>,
    current_index: usize,
    finished: bool,
    last_speed_limit: f64,
}

impl Route {
    /// Builds a route positioned at its first point.
    ///
    /// # Errors
    ///
    /// - [`RouteError::Empty`] when `points` is empty.
    /// - [`RouteError::TooManySpeedLimits`] when there are more limits than points.
    pub fn new(points: Vec<GeoPoint>, speed_limits: Vec<SpeedLimit>) -> Result<Self, RouteError> {
        if points.is_empty() {
            return Err(RouteError::Empty);
        }
        if speed_limits.len() > points.len() {
            return Err(RouteError::TooManySpeedLimits {
                points: points.len(),
                limits: speed_limits.len(),
            });
        }
        Ok(Self {
            points,
            speed_limits,
            current_index: 0,
            finished: false,
            last_speed_limit: 0.0,
        })
    }

    pub fn from_mission(mission: &Mission) -> Result<Self, RouteError> {
        Self::new(mission.waypoints.clone(), mission.speed_limits.clone())
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Last limit resolved by [`Route::calculate_speed`], in km/h.
    pub fn last_speed_limit(&self) -> f64 {
        self.last_speed_limit
    }

    fn last_index(&self) -> usize {
        self.points.len() - 1
    }

    pub fn current_point(&self) -> Option<GeoPoint> {
        self.points.get(self.current_index).copied()
    }

    /// Point the vehicle is heading to, `None` once the route is finished.
    pub fn next_point(&self) -> Option<GeoPoint> {
        if self.finished || self.current_index >= self.last_index() {
            return None;
        }
        self.points.get(self.current_index + 1).copied()
    }

    /// Advances to the next point.
    ///
    /// Returns `false` without moving when already at the last point; the call
    /// still confirms the route as finished.
    pub fn move_to_next_point(&mut self) -> bool {
        if self.current_index < self.last_index() {
            self.current_index += 1;
            if self.current_index == self.last_index() {
                self.finished = true;
            }
            return true;
        }
        self.finished = true;
        false
    }

    /// Length of the current segment in metres, 0 at the last point.
    pub fn distance_to_next_point(&self) -> f64 {
        match (self.current_point(), self.segment_end()) {
            (Some(from), Some(to)) => geo::distance_m(from, to),
            _ => 0.0,
        }
    }

    /// Distance in metres from `position` to the next point, 0 at the last point.
    pub fn remaining_distance_to_next_point(&self, position: GeoPoint) -> f64 {
        self.segment_end()
            .map(|to| geo::distance_m(position, to))
            .unwrap_or(0.0)
    }

    fn segment_end(&self) -> Option<GeoPoint> {
        if self.current_index < self.last_index() {
            self.points.get(self.current_index + 1).copied()
        } else {
            None
        }
    }

    /// Speed limit for the current segment in km/h, 0 once finished.
    pub fn calculate_speed(&mut self) -> f64 {
        if self.finished {
            return 0.0;
        }
        if let Some(limit) = self
            .speed_limits
            .iter()
            .find(|limit| limit.waypoint_index == self.current_index)
        {
            self.last_speed_limit = limit.speed_limit;
        }
        self.last_speed_limit
    }

    /// Time to cover the current segment at the last resolved limit.
    ///
    /// `None` when no positive limit has been resolved yet.
    pub fn travel_time_to_next_point(&self) -> Option<Duration> {
        if self.last_speed_limit <= 0.0 {
            return None;
        }
        let metres_per_sec = self.last_speed_limit * 1000.0 / 3600.0;
        Some(Duration::from_secs_f64(
            self.distance_to_next_point() / metres_per_sec,
        ))
    }
}
