//! Observed phenomena (speed, CO2, rpm, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A measurable phenomenon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phenomenon {
    /// Unique name, e.g. `Speed`.
    pub name: String,
    /// Unit of measure, e.g. `km/h`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Creation time.
    #[serde(default = "Utc::now")]
    pub created: DateTime<Utc>,
    /// Last modification time.
    #[serde(default = "Utc::now")]
    pub modified: DateTime<Utc>,
}

impl Phenomenon {
    /// Creates a phenomenon without a unit.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            unit: None,
            created: now,
            modified: now,
        }
    }

    /// Sets the unit.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }
}
