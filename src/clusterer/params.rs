use serde::{Deserialize, Serialize};

use super::ParamError;
use crate::units::{SpatialUnit, TemporalUnit};

/// User-facing clustering parameters, thresholds still in their chosen units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StdbscanParams {
    /// Spatial size of a neighborhood, in `space_unit`
    pub epsilon_space: f64,
    pub space_unit: SpatialUnit,
    /// Temporal size of a neighborhood, in `time_unit`
    pub epsilon_time: f64,
    pub time_unit: TemporalUnit,
    /// Minimal neighborhood size (center included) for a core point
    pub min_points: usize,
    /// Produce a `cluster_<id>` label per record
    pub add_cluster_label: bool,
    /// Leave noise records out of labeled output
    pub remove_unlabeled: bool,
    /// Precompute all neighborhoods on the rayon pool before expanding
    pub parallel: bool,
}

/// Validated thresholds in the metric units: kilometers and days
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub epsilon_space_km: f64,
    pub epsilon_time_days: f64,
    pub min_points: usize,
}

impl StdbscanParams {
    /// Create parameters with default values
    pub fn new() -> Self {
        Self {
            epsilon_space: 10.0,
            space_unit: SpatialUnit::Kilometers,
            epsilon_time: 10.0,
            time_unit: TemporalUnit::Hours,
            min_points: 5,
            add_cluster_label: true,
            remove_unlabeled: false,
            parallel: false,
        }
    }

    /// Set the spatial threshold and its unit
    pub fn epsilon_space(mut self, value: f64, unit: SpatialUnit) -> Self {
        self.epsilon_space = value;
        self.space_unit = unit;
        self
    }

    /// Set the temporal threshold and its unit
    pub fn epsilon_time(mut self, value: f64, unit: TemporalUnit) -> Self {
        self.epsilon_time = value;
        self.time_unit = unit;
        self
    }

    pub fn min_points(mut self, min_points: usize) -> Self {
        self.min_points = min_points;
        self
    }

    pub fn add_cluster_label(mut self, enabled: bool) -> Self {
        self.add_cluster_label = enabled;
        self
    }

    pub fn remove_unlabeled(mut self, enabled: bool) -> Self {
        self.remove_unlabeled = enabled;
        self
    }

    pub fn parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Check preconditions and convert both thresholds once
    pub fn validate(&self) -> Result<Thresholds, ParamError> {
        check_threshold("epsilon_space", self.epsilon_space)?;
        check_threshold("epsilon_time", self.epsilon_time)?;

        if self.min_points < 1 {
            return Err(ParamError::MinPointsTooSmall(self.min_points));
        }

        Ok(Thresholds {
            epsilon_space_km: self.space_unit.to_km(self.epsilon_space),
            epsilon_time_days: self.time_unit.to_days(self.epsilon_time),
            min_points: self.min_points,
        })
    }
}

impl Default for StdbscanParams {
    fn default() -> Self {
        Self::new()
    }
}

impl Thresholds {
    /// Thresholds already expressed in kilometers and days
    ///
    /// No validation is performed; use [`StdbscanParams::validate`] for
    /// user input.
    pub fn new(epsilon_space_km: f64, epsilon_time_days: f64, min_points: usize) -> Self {
        Self {
            epsilon_space_km,
            epsilon_time_days,
            min_points,
        }
    }
}

fn check_threshold(name: &'static str, value: f64) -> Result<(), ParamError> {
    if !value.is_finite() {
        return Err(ParamError::NonFiniteThreshold { name, value });
    }
    if value < 0.0 {
        return Err(ParamError::NegativeThreshold { name, value });
    }
    Ok(())
}
