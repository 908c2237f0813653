//! Fuelings logged by a user for their car.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// Kind of fuel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuelType {
    /// Petrol / gasoline
    Gasoline,
    /// Diesel
    Diesel,
    /// Liquefied petroleum gas
    Gas,
    /// Battery electric
    Electric,
    /// Hybrid
    Hybrid,
}

impl FuelType {
    /// Lowercase name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            FuelType::Gasoline => "gasoline",
            FuelType::Diesel => "diesel",
            FuelType::Gas => "gas",
            FuelType::Electric => "electric",
            FuelType::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value with a unit, e.g. `42.5 l`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    /// Numeric value.
    pub value: f64,
    /// Unit of measure.
    pub unit: String,
}

impl Quantity {
    /// Creates a quantity.
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }
}

/// A single refuelling event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fueling {
    /// Unique identifier.
    pub id: String,
    /// Name of the user who logged the fueling.
    pub owner: String,
    /// When the car was refuelled.
    pub time: DateTime<Utc>,
    /// Fuel kind.
    pub fuel_type: FuelType,
    /// Amount of fuel.
    pub volume: Quantity,
    /// Price paid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<Quantity>,
    /// Odometer reading.
    pub mileage: Quantity,
    /// The previous fueling was not logged.
    #[serde(default)]
    pub missed_fuel_stop: bool,
    /// The tank was not filled completely.
    #[serde(default)]
    pub partial_fueling: bool,
    /// Free-form comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Creation time.
    #[serde(default = "Utc::now")]
    pub created: DateTime<Utc>,
    /// Last modification time.
    #[serde(default = "Utc::now")]
    pub modified: DateTime<Utc>,
}

impl Fueling {
    /// Checks quantities for sanity.
    pub fn validate(&self) -> Result<()> {
        if !(self.volume.value > 0.0) {
            return Err(Error::validation_field("volume", "must be positive"));
        }
        if !(self.mileage.value >= 0.0) {
            return Err(Error::validation_field("mileage", "must not be negative"));
        }
        if let Some(cost) = &self.cost
            && !(cost.value >= 0.0)
        {
            return Err(Error::validation_field("cost", "must not be negative"));
        }
        Ok(())
    }
}
