//! Spatio-temporal density clustering.
//!
//! Two records are neighbors only when they are closer than both thresholds
//! at once: great-circle distance below `epsilon_space` and elapsed time
//! below `epsilon_time`. Dense neighborhoods seed clusters which are then
//! grown through a FIFO work queue.
//!
//! Unlike textbook DBSCAN, a record flagged as noise by the outer scan can
//! still be absorbed later as a border point of another cluster.

mod cancel;
mod error;
mod expansion;
mod neighborhood;
mod params;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use cancel::CancelToken;
pub use error::{ClusterError, ParamError};
pub use expansion::{cluster, expand_clusters, run_with_query};
pub use neighborhood::{neighborhood, BruteForceScan, NeighborhoodQuery, PrecomputedNeighborhoods};
pub use params::{StdbscanParams, Thresholds};
pub use state::VisitState;
pub use types::{Cluster, ClusterModel, ClusterRun, NOISE};
