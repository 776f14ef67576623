use thiserror::Error;

/// Rejected clustering parameters, reported before a run starts
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParamError {
    #[error("{name} must not be negative (got {value})")]
    NegativeThreshold { name: &'static str, value: f64 },

    #[error("{name} must be a finite number (got {value})")]
    NonFiniteThreshold { name: &'static str, value: f64 },

    #[error("min_points must be at least 1 (got {0})")]
    MinPointsTooSmall(usize),

    #[error("Unknown unit: {0}")]
    UnknownUnit(String),
}

#[derive(Error, Debug)]
pub enum ClusterError {
    #[error("Invalid parameters: {0}")]
    InvalidParams(#[from] ParamError),

    #[error("Clustering cancelled after {processed} of {total} records")]
    Cancelled { processed: usize, total: usize },
}
