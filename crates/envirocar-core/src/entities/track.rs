//! Tracks: ordered series of measurements recorded in one trip.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Measurement;

/// Track metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique identifier.
    pub id: String,
    /// Optional display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Name of the user who uploaded the track.
    pub owner: String,
    /// Creation time.
    #[serde(default = "Utc::now")]
    pub created: DateTime<Utc>,
    /// Last modification time.
    #[serde(default = "Utc::now")]
    pub modified: DateTime<Utc>,
}

impl Track {
    /// Creates a track without name or description.
    pub fn new(id: impl Into<String>, owner: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: None,
            description: None,
            owner: owner.into(),
            created: now,
            modified: now,
        }
    }

    /// Sets the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A track together with its measurements, in time order.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackDetails {
    /// Track metadata.
    pub track: Track,
    /// Measurements sorted by time.
    pub measurements: Vec<Measurement>,
}

impl TrackDetails {
    /// Bundles a track with its measurements, sorting them by time.
    pub fn new(track: Track, mut measurements: Vec<Measurement>) -> Self {
        measurements.sort_by_key(|m| m.time);
        Self {
            track,
            measurements,
        }
    }

    /// Time of the first measurement.
    pub fn begin(&self) -> Option<DateTime<Utc>> {
        self.measurements.first().map(|m| m.time)
    }

    /// Time of the last measurement.
    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.measurements.last().map(|m| m.time)
    }

    /// Names of all phenomena observed in the track, in first-seen order.
    pub fn phenomena(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for value in self.measurements.iter().flat_map(|m| &m.values) {
            if !names.contains(&value.phenomenon) {
                names.push(value.phenomenon.clone());
            }
        }
        names
    }
}
