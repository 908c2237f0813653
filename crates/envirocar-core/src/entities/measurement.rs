//! Point measurements recorded along a track.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// WGS84 point (longitude, latitude).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Longitude in degrees.
    pub lon: f64,
    /// Latitude in degrees.
    pub lat: f64,
}

impl Point {
    /// Creates a point.
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Rejects coordinates outside the WGS84 range.
    pub fn validate(&self) -> Result<()> {
        if !(-180.0..=180.0).contains(&self.lon) || !(-90.0..=90.0).contains(&self.lat) {
            return Err(Error::validation_field(
                "geometry",
                format!("coordinates out of range: ({}, {})", self.lon, self.lat),
            ));
        }
        Ok(())
    }
}

/// One phenomenon value within a measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementValue {
    /// Phenomenon name.
    pub phenomenon: String,
    /// Unit copied from the phenomenon at recording time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Observed value.
    pub value: f64,
}

/// A single measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Unique identifier; assigned by the store when empty.
    #[serde(default)]
    pub id: String,
    /// Track this measurement belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track: Option<String>,
    /// Name of the user who recorded it.
    #[serde(default)]
    pub owner: String,
    /// Observation time.
    pub time: DateTime<Utc>,
    /// Location.
    pub geometry: Point,
    /// Observed values.
    #[serde(default)]
    pub values: Vec<MeasurementValue>,
    /// Creation time.
    #[serde(default = "Utc::now")]
    pub created: DateTime<Utc>,
    /// Last modification time.
    #[serde(default = "Utc::now")]
    pub modified: DateTime<Utc>,
}

impl Measurement {
    /// Creates a measurement without values.
    pub fn new(
        id: impl Into<String>,
        owner: impl Into<String>,
        time: DateTime<Utc>,
        geometry: Point,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            track: None,
            owner: owner.into(),
            time,
            geometry,
            values: Vec::new(),
            created: now,
            modified: now,
        }
    }

    /// Assigns the track.
    pub fn in_track(mut self, track: impl Into<String>) -> Self {
        self.track = Some(track.into());
        self
    }

    /// Adds a value.
    pub fn with_value(
        mut self,
        phenomenon: impl Into<String>,
        unit: Option<&str>,
        value: f64,
    ) -> Self {
        self.values.push(MeasurementValue {
            phenomenon: phenomenon.into(),
            unit: unit.map(str::to_string),
            value,
        });
        self
    }

    /// Returns the value recorded for a phenomenon, if any.
    pub fn value_of(&self, phenomenon: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|v| v.phenomenon == phenomenon)
            .map(|v| v.value)
    }
}
