//! Unit selectors for the two neighborhood thresholds.
//!
//! Thresholds are entered in a user-chosen unit and converted exactly once,
//! before a run, into the units the distance metrics produce: kilometers for
//! space and days for time.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::clusterer::ParamError;


/// Unit of the spatial threshold
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SpatialUnit {
    Millimeters,
    Centimeter,
    Decimeter,
    Meters,
    #[default]
    Kilometers,
}

/// Unit of the temporal threshold
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TemporalUnit {
    Milliseconds,
    Seconds,
    Minutes,
    #[default]
    Hours,
    Days,
    Weeks,
}

impl SpatialUnit {
    pub const ALL: [SpatialUnit; 5] = [
        SpatialUnit::Millimeters,
        SpatialUnit::Centimeter,
        SpatialUnit::Decimeter,
        SpatialUnit::Meters,
        SpatialUnit::Kilometers,
    ];

    /// Selector name as accepted by the parser
    pub fn name(&self) -> &'static str {
        match self {
            SpatialUnit::Millimeters => "millimeters",
            SpatialUnit::Centimeter => "centimeter",
            SpatialUnit::Decimeter => "decimeter",
            SpatialUnit::Meters => "meters",
            SpatialUnit::Kilometers => "kilometers",
        }
    }

    /// Kilometers per one unit
    pub fn km_factor(&self) -> f64 {
        match self {
            SpatialUnit::Millimeters => 1e-6,
            SpatialUnit::Centimeter => 1e-5,
            SpatialUnit::Decimeter => 1e-4,
            SpatialUnit::Meters => 1e-3,
            SpatialUnit::Kilometers => 1.0,
        }
    }

    pub fn to_km(&self, value: f64) -> f64 {
        value * self.km_factor()
    }
}

impl TemporalUnit {
    pub const ALL: [TemporalUnit; 6] = [
        TemporalUnit::Milliseconds,
        TemporalUnit::Seconds,
        TemporalUnit::Minutes,
        TemporalUnit::Hours,
        TemporalUnit::Days,
        TemporalUnit::Weeks,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TemporalUnit::Milliseconds => "milliseconds",
            TemporalUnit::Seconds => "seconds",
            TemporalUnit::Minutes => "minutes",
            TemporalUnit::Hours => "hours",
            TemporalUnit::Days => "days",
            TemporalUnit::Weeks => "weeks",
        }
    }

    pub fn to_days(&self, value: f64) -> f64 {
        match self {
            TemporalUnit::Milliseconds => value / (1000.0 * 24.0 * 60.0 * 60.0),
            TemporalUnit::Seconds => value / (24.0 * 60.0 * 60.0),
            TemporalUnit::Minutes => value / (24.0 * 60.0),
            TemporalUnit::Hours => value / 24.0,
            TemporalUnit::Days => value,
            TemporalUnit::Weeks => value * 7.0,
        }
    }
}

impl FromStr for SpatialUnit {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|u| u.name() == wanted)
            .ok_or_else(|| ParamError::UnknownUnit(s.to_string()))
    }
}

impl FromStr for TemporalUnit {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|u| u.name() == wanted)
            .ok_or_else(|| ParamError::UnknownUnit(s.to_string()))
    }
}

impl fmt::Display for SpatialUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for TemporalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
