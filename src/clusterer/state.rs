use super::NOISE;
use crate::record::RecordIndex;

/// Per-run bookkeeping, one slot per record
///
/// Owned by a single run and handed to the engine by `&mut`. Both flags only
/// ever go from `false` to `true`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitState {
    /// Reached by some cluster's expansion
    pub visited: Vec<bool>,
    /// Seen by the outer scan with too small a neighborhood
    pub noised: Vec<bool>,
    /// Cluster id per record, [`NOISE`] when unassigned
    pub assignments: Vec<usize>,
}

impl VisitState {
    pub fn new(len: usize) -> Self {
        Self {
            visited: vec![false; len],
            noised: vec![false; len],
            assignments: vec![NOISE; len],
        }
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn is_visited(&self, index: RecordIndex) -> bool {
        self.visited[index]
    }

    pub fn is_noised(&self, index: RecordIndex) -> bool {
        self.noised[index]
    }

    pub fn mark_noise(&mut self, index: RecordIndex) {
        self.noised[index] = true;
    }

    /// Set the cluster id without marking the record visited
    pub fn label(&mut self, index: RecordIndex, cluster: usize) {
        self.assignments[index] = cluster;
    }

    /// Set the cluster id and mark the record visited
    pub fn absorb(&mut self, index: RecordIndex, cluster: usize) {
        self.assignments[index] = cluster;
        self.visited[index] = true;
    }

    pub fn into_assignments(self) -> Vec<usize> {
        self.assignments
    }
}
