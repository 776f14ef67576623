use clap::Parser;
use std::path::PathBuf;

use crate::clusterer::StdbscanParams;
use crate::io::FieldBindings;
use crate::units::{SpatialUnit, TemporalUnit};

/// Spatio-temporal DBSCAN over a JSON file of geotagged, timestamped records
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// JSON file holding an array of record objects
    #[arg(long, short, value_name = "FILE")]
    pub input: PathBuf,

    /// Write the run report to this file instead of stdout
    #[arg(long, short, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Attribute holding the record identifier
    #[arg(long, default_value = "id")]
    pub id_field: String,

    /// Attribute holding the longitude in degrees
    #[arg(long, default_value = "longitude")]
    pub longitude_field: String,

    /// Attribute holding the latitude in degrees
    #[arg(long, default_value = "latitude")]
    pub latitude_field: String,

    /// Attribute holding the timestamp (number, or RFC 3339 string read as epoch milliseconds)
    #[arg(long, default_value = "timestamp")]
    pub time_field: String,

    /// Spatial size of a neighborhood
    #[arg(long, default_value_t = 10.0)]
    pub epsilon_space: f64,

    /// Unit of --epsilon-space
    #[arg(long, value_enum, default_value_t = SpatialUnit::Kilometers)]
    pub space_unit: SpatialUnit,

    /// Temporal size of a neighborhood
    #[arg(long, default_value_t = 10.0)]
    pub epsilon_time: f64,

    /// Unit of --epsilon-time
    #[arg(long, value_enum, default_value_t = TemporalUnit::Hours)]
    pub time_unit: TemporalUnit,

    /// Minimal number of points forming a cluster
    #[arg(long, default_value_t = 5)]
    pub min_points: usize,

    /// Do not emit a `cluster_<id>` label per record
    #[arg(long, default_value_t = false)]
    pub no_cluster_label: bool,

    /// Leave noise records out of the report's assignment list
    #[arg(long, default_value_t = false)]
    pub remove_unlabeled: bool,

    /// Precompute neighborhoods on all cores before expanding clusters
    #[arg(long, default_value_t = false)]
    pub parallel: bool,

    /// Abort the run if it takes longer than this many seconds
    #[arg(long, value_name = "SECS")]
    pub max_runtime_secs: Option<u64>,

    /// Verbose logging (DEBUG level)
    #[arg(long, short, default_value_t = false)]
    pub verbose: bool,
}

impl Config {
    pub fn params(&self) -> StdbscanParams {
        StdbscanParams::new()
            .epsilon_space(self.epsilon_space, self.space_unit)
            .epsilon_time(self.epsilon_time, self.time_unit)
            .min_points(self.min_points)
            .add_cluster_label(!self.no_cluster_label)
            .remove_unlabeled(self.remove_unlabeled)
            .parallel(self.parallel)
    }

    pub fn bindings(&self) -> FieldBindings {
        FieldBindings {
            id: self.id_field.clone(),
            longitude: self.longitude_field.clone(),
            latitude: self.latitude_field.clone(),
            timestamp: self.time_field.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_params_defaults() {
        let config = Config::parse_from(["stdbscan", "--input", "records.json"]);
        assert_eq!(config.params(), StdbscanParams::default());
        assert_eq!(config.bindings(), FieldBindings::default());
        assert!(config.output.is_none());
        assert!(config.max_runtime_secs.is_none());
    }

    #[test]
    fn test_flags_map_to_params() {
        let config = Config::parse_from([
            "stdbscan",
            "-i",
            "in.json",
            "--epsilon-space",
            "250",
            "--space-unit",
            "meters",
            "--epsilon-time",
            "30",
            "--time-unit",
            "minutes",
            "--min-points",
            "3",
            "--no-cluster-label",
            "--remove-unlabeled",
            "--parallel",
            "--time-field",
            "ts",
        ]);

        let params = config.params();
        assert_eq!(params.epsilon_space, 250.0);
        assert_eq!(params.space_unit, SpatialUnit::Meters);
        assert_eq!(params.epsilon_time, 30.0);
        assert_eq!(params.time_unit, TemporalUnit::Minutes);
        assert_eq!(params.min_points, 3);
        assert!(!params.add_cluster_label);
        assert!(params.remove_unlabeled);
        assert!(params.parallel);
        assert_eq!(config.bindings().timestamp, "ts");
    }

    #[test]
    fn test_unknown_unit_is_rejected() {
        let result = Config::try_parse_from(["stdbscan", "-i", "x.json", "--space-unit", "miles"]);
        assert!(result.is_err());
    }
}
