use serde::{Deserialize, Serialize};

use super::Thresholds;
use crate::record::RecordIndex;

/// Assignment value of a record no cluster absorbed
pub const NOISE: usize = 0;

/// One discovered cluster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    pub id: usize,
    /// Member record indices in input order
    pub members: Vec<RecordIndex>,
}

/// Result of a clustering run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterModel {
    /// Reported cluster count, never below 1
    num_clusters: usize,
    /// Clusters actually discovered, may be 0
    discovered: usize,
    /// Cluster id per record, aligned with input order
    assignments: Vec<usize>,
}

/// A model plus the optional per-record labels
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterRun {
    pub model: ClusterModel,
    /// `cluster_<id>` per record, present when labels were requested
    pub labels: Option<Vec<String>>,
    pub thresholds: Thresholds,
}

impl Cluster {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl ClusterModel {
    pub fn new(discovered: usize, assignments: Vec<usize>) -> Self {
        Self {
            num_clusters: discovered.max(1),
            discovered,
            assignments,
        }
    }

    /// Cluster count as reported to hosts; a run without clusters reports 1
    pub fn num_clusters(&self) -> usize {
        self.num_clusters
    }

    pub fn discovered_clusters(&self) -> usize {
        self.discovered
    }

    pub fn assignments(&self) -> &[usize] {
        &self.assignments
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Cluster id of a record, `None` for noise or an unknown index
    pub fn cluster_of(&self, index: RecordIndex) -> Option<usize> {
        self.assignments.get(index).copied().filter(|&c| c != NOISE)
    }

    pub fn is_noise(&self, index: RecordIndex) -> bool {
        self.assignments.get(index) == Some(&NOISE)
    }

    /// Indices of all noise records
    pub fn noise(&self) -> Vec<RecordIndex> {
        self.assignments
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c == NOISE)
            .map(|(i, _)| i)
            .collect()
    }

    /// Members grouped per cluster id, ids `1..=discovered`
    pub fn clusters(&self) -> Vec<Cluster> {
        let mut clusters: Vec<Cluster> = (1..=self.discovered)
            .map(|id| Cluster {
                id,
                members: vec![],
            })
            .collect();

        for (index, &c) in self.assignments.iter().enumerate() {
            if let Some(cluster) = c.checked_sub(1).and_then(|slot| clusters.get_mut(slot)) {
                cluster.members.push(index);
            }
        }

        clusters
    }

    /// `cluster_<id>` for every record, `cluster_0` for noise
    pub fn cluster_labels(&self) -> Vec<String> {
        self.assignments
            .iter()
            .map(|c| format!("cluster_{}", c))
            .collect()
    }

    /// `(index, cluster)` pairs, optionally without noise records
    pub fn labeled_records(&self, remove_unlabeled: bool) -> Vec<(RecordIndex, usize)> {
        self.assignments
            .iter()
            .copied()
            .enumerate()
            .filter(|&(_, c)| !remove_unlabeled || c != NOISE)
            .collect()
    }
}
