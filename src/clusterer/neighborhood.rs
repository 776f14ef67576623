use rayon::prelude::*;
use std::borrow::Cow;

use super::Thresholds;
use crate::metric::{spatial_km, temporal_days};
use crate::record::{Record, RecordIndex};

/// All records strictly within both thresholds of `center`, in input order
///
/// The center itself is part of its own neighborhood whenever both
/// thresholds are positive. Boundary-equal records are excluded.
pub fn neighborhood(center: &Record, records: &[Record], thresholds: &Thresholds) -> Vec<RecordIndex> {
    records
        .iter()
        .enumerate()
        .filter(|(_, other)| {
            temporal_days(center, other) < thresholds.epsilon_time_days
                && spatial_km(center, other) < thresholds.epsilon_space_km
        })
        .map(|(i, _)| i)
        .collect()
}

/// Source of neighborhoods for the expansion engine
pub trait NeighborhoodQuery: Send + Sync {
    /// Number of records covered by this query
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Neighborhood size a record needs to seed or extend a cluster
    fn min_points(&self) -> usize;

    /// Neighborhood of the record at `center`, in input order
    fn neighbors(&self, center: RecordIndex) -> Cow<'_, [RecordIndex]>;
}

/// Scans every record on each call
pub struct BruteForceScan<'a> {
    records: &'a [Record],
    thresholds: Thresholds,
}

impl<'a> BruteForceScan<'a> {
    pub fn new(records: &'a [Record], thresholds: Thresholds) -> Self {
        Self {
            records,
            thresholds,
        }
    }
}

impl NeighborhoodQuery for BruteForceScan<'_> {
    fn len(&self) -> usize {
        self.records.len()
    }

    fn min_points(&self) -> usize {
        self.thresholds.min_points
    }

    fn neighbors(&self, center: RecordIndex) -> Cow<'_, [RecordIndex]> {
        Cow::Owned(neighborhood(
            &self.records[center],
            self.records,
            &self.thresholds,
        ))
    }
}

/// Every neighborhood computed up front, one rayon task per record
///
/// Memory grows with the total number of neighbor pairs.
pub struct PrecomputedNeighborhoods {
    lists: Vec<Vec<RecordIndex>>,
    min_points: usize,
}

impl PrecomputedNeighborhoods {
    pub fn build(records: &[Record], thresholds: &Thresholds) -> Self {
        let lists = records
            .par_iter()
            .map(|center| neighborhood(center, records, thresholds))
            .collect();

        Self {
            lists,
            min_points: thresholds.min_points,
        }
    }

    /// Sum of all neighborhood sizes
    pub fn total_pairs(&self) -> usize {
        self.lists.iter().map(Vec::len).sum()
    }
}

impl NeighborhoodQuery for PrecomputedNeighborhoods {
    fn len(&self) -> usize {
        self.lists.len()
    }

    fn min_points(&self) -> usize {
        self.min_points
    }

    fn neighbors(&self, center: RecordIndex) -> Cow<'_, [RecordIndex]> {
        Cow::Borrowed(&self.lists[center])
    }
}
