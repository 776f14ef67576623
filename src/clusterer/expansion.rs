use std::collections::VecDeque;
use tracing::{debug, info};

use super::{
    BruteForceScan, CancelToken, ClusterError, ClusterModel, ClusterRun, NeighborhoodQuery,
    PrecomputedNeighborhoods, StdbscanParams, Thresholds, VisitState,
};
use crate::record::RecordSet;

/// Run the density expansion over every record of `query`
///
/// Records are scanned in input order. A record whose neighborhood holds at
/// least `query.min_points()` entries seeds a new cluster; its neighborhood becomes a
/// FIFO work queue. Each dequeued record is absorbed into the cluster and,
/// if it is itself dense, its unvisited neighbors are absorbed too. Only
/// neighbors never flagged as noise are queued for further expansion.
///
/// # Returns
/// The number of clusters discovered (cluster ids run from 1 to that value)
pub fn expand_clusters<Q>(
    query: &Q,
    state: &mut VisitState,
    cancel: &CancelToken,
) -> Result<usize, ClusterError>
where
    Q: NeighborhoodQuery + ?Sized,
{
    let total = query.len();
    let min_points = query.min_points();
    let mut cluster_index = 1;

    for i in 0..total {
        if cancel.is_cancelled() {
            return Err(ClusterError::Cancelled {
                processed: i,
                total,
            });
        }

        if state.is_visited(i) {
            continue;
        }

        let seed = query.neighbors(i);
        if seed.len() < min_points {
            state.mark_noise(i);
            continue;
        }

        state.label(i, cluster_index);
        let mut queue: VecDeque<usize> = seed.iter().copied().collect();
        let mut expanded = 0usize;

        while let Some(current) = queue.pop_front() {
            state.absorb(current, cluster_index);
            expanded += 1;

            let neighbors = query.neighbors(current);
            if neighbors.len() < min_points {
                continue;
            }

            for &k in neighbors.iter() {
                if state.is_visited(k) {
                    continue;
                }
                if !state.is_noised(k) {
                    queue.push_back(k);
                }
                state.absorb(k, cluster_index);
            }
        }

        debug!(
            "Cluster {} seeded at record {} ({} records expanded)",
            cluster_index, i, expanded
        );
        cluster_index += 1;
    }

    Ok(cluster_index - 1)
}

/// Run a complete clustering pass against a prepared neighborhood source
pub fn run_with_query<Q>(
    query: &Q,
    cancel: &CancelToken,
) -> Result<ClusterModel, ClusterError>
where
    Q: NeighborhoodQuery + ?Sized,
{
    let mut state = VisitState::new(query.len());
    let discovered = expand_clusters(query, &mut state, cancel)?;
    Ok(ClusterModel::new(discovered, state.into_assignments()))
}

/// Validate `params`, cluster `records` and materialize labels if requested
pub fn cluster(
    records: &RecordSet,
    params: &StdbscanParams,
    cancel: &CancelToken,
) -> Result<ClusterRun, ClusterError> {
    let thresholds = params.validate()?;

    info!(
        "Clustering {} records (eps_space={} km, eps_time={} days, min_points={})",
        records.len(),
        thresholds.epsilon_space_km,
        thresholds.epsilon_time_days,
        thresholds.min_points
    );

    let model = if params.parallel {
        precomputed_run(records, &thresholds, cancel)?
    } else {
        let scan = BruteForceScan::new(records.as_slice(), thresholds);
        run_with_query(&scan, cancel)?
    };

    info!(
        "Found {} clusters, {} noise records",
        model.discovered_clusters(),
        model.noise().len()
    );

    let labels = params.add_cluster_label.then(|| model.cluster_labels());

    Ok(ClusterRun {
        model,
        labels,
        thresholds,
    })
}

fn precomputed_run(
    records: &RecordSet,
    thresholds: &Thresholds,
    cancel: &CancelToken,
) -> Result<ClusterModel, ClusterError> {
    if cancel.is_cancelled() {
        return Err(ClusterError::Cancelled {
            processed: 0,
            total: records.len(),
        });
    }

    let index = PrecomputedNeighborhoods::build(records.as_slice(), thresholds);
    debug!(
        "Precomputed {} neighborhoods ({} neighbor pairs)",
        index.len(),
        index.total_pairs()
    );

    run_with_query(&index, cancel)
}
