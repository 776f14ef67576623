// Public API exports
pub mod clusterer;
pub mod config;
pub mod io;
pub mod metric;
pub mod record;
pub mod units;

// Re-export main types for convenience
pub use record::{Record, RecordIndex, RecordSet};

pub use metric::{haversine_km, spatial_km, temporal_days};

pub use units::{SpatialUnit, TemporalUnit};

pub use clusterer::{
    cluster, neighborhood, CancelToken, Cluster, ClusterError, ClusterModel, ClusterRun,
    ParamError, StdbscanParams, Thresholds, NOISE,
};

pub use io::{load_dataset, write_report, Dataset, FieldBindings, RunReport};
