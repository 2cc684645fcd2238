//! Mission construction from a waypoint file.

use shared_types::{GeoPoint, Mission, SpeedLimit};
use std::num::ParseFloatError;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::adapters::wpl::WplParser;

#[derive(Debug, Error)]
pub enum MissionImportError {
    #[error("Cannot read mission file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Bad coordinate on line {line}: {source}")]
    BadCoordinate {
        line: usize,
        #[source]
        source: ParseFloatError,
    },

    #[error("Mission file contains no waypoints")]
    NoWaypoints,
}

/// Builds a [`Mission`] whose home is the first waypoint of the file.
///
/// Imported missions start disarmed and without speed limits.
#[derive(Debug, Clone)]
pub struct MissionImporter {
    mission: Mission,
}

impl MissionImporter {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, MissionImportError> {
        let points = WplParser::new(path.as_ref()).parse()?;
        Self::from_points(points)
    }

    pub fn from_points(points: Vec<GeoPoint>) -> Result<Self, MissionImportError> {
        let home = *points.first().ok_or(MissionImportError::NoWaypoints)?;
        Ok(Self {
            mission: Mission::new(home, points, Vec::new()),
        })
    }

    pub fn set_speed_limits(&mut self, speed_limits: Vec<SpeedLimit>) -> &mut Self {
        self.mission.speed_limits = speed_limits;
        self
    }

    pub fn set_armed(&mut self, armed: bool) -> &mut Self {
        self.mission.armed = armed;
        self
    }

    pub fn mission(&self) -> &Mission {
        &self.mission
    }

    pub fn into_mission(self) -> Mission {
        self.mission
    }
}
