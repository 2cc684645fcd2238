//! QGC WPL 110 waypoint files.
//!
//! ```text
//! QGC WPL 110
//! <idx> <cur> <frame> <cmd> <p1> <p2> <p3> <p4> <lat> <lon> <alt> <autocontinue>
//! ```
//!
//! Only latitude and longitude are read; lines with fewer than ten fields
//! are skipped.

use shared_types::{GeoPoint, Mission};
use std::fmt::Write as _;
use std::num::ParseFloatError;
use std::path::{Path, PathBuf};

use crate::adapters::mission_import::MissionImportError;

pub const WPL_HEADER: &str = "QGC WPL 110";

const LAT_FIELD: usize = 8;
const LON_FIELD: usize = 9;
const MIN_FIELDS: usize = 10;

#[derive(Debug, Clone)]
pub struct WplParser {
    path: PathBuf,
}

impl WplParser {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn parse(&self) -> Result<Vec<GeoPoint>, MissionImportError> {
        let text = std::fs::read_to_string(&self.path).map_err(|source| MissionImportError::Io {
            path: self.path.clone(),
            source,
        })?;
        parse_points(&text)
    }
}

/// Points of a WPL document, header line excluded.
pub fn parse_points(text: &str) -> Result<Vec<GeoPoint>, MissionImportError> {
    text.lines()
        .enumerate()
        .skip(1)
        .filter_map(|(idx, line)| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            (fields.len() >= MIN_FIELDS).then(|| (idx + 1, fields))
        })
        .map(|(line, fields)| {
            let coordinate = |i: usize| -> Result<f64, MissionImportError> {
                fields[i]
                    .parse()
                    .map_err(|source: ParseFloatError| MissionImportError::BadCoordinate { line, source })
            };
            Ok(GeoPoint::new(coordinate(LAT_FIELD)?, coordinate(LON_FIELD)?))
        })
        .collect()
}

/// Renders a mission as a WPL document: home first as index 0, then every
/// waypoint.
pub fn render_wpl(mission: &Mission) -> String {
    let mut out = format!("{WPL_HEADER}\n");
    let _ = writeln!(
        out,
        "0\t1\t0\t16\t0\t5\t0\t0\t{}\t{}\t0\t1",
        mission.home.latitude, mission.home.longitude
    );
    for (i, wp) in mission.waypoints.iter().enumerate() {
        let _ = writeln!(
            out,
            "{i}\t0\t3\t16\t0\t5\t0\t0\t{}\t{}\t0\t1",
            wp.latitude, wp.longitude
        );
    }
    out
}
