use super::*;
use crate::metric::EARTH_RADIUS_KM;
use crate::record::{Record, RecordSet};
use crate::units::{SpatialUnit, TemporalUnit};

const KM_PER_DEGREE: f64 = EARTH_RADIUS_KM * std::f64::consts::PI / 180.0;
const HOUR: f64 = 3600.0;

/// Record `km` kilometers north of (10E, 50N), `secs` seconds after zero
fn north_of(km: f64, secs: f64) -> Record {
    Record::new(10.0, 50.0 + km / KM_PER_DEGREE, secs)
}

fn params(eps_km: f64, eps_hours: f64, min_points: usize) -> StdbscanParams {
    StdbscanParams::new()
        .epsilon_space(eps_km, SpatialUnit::Kilometers)
        .epsilon_time(eps_hours, TemporalUnit::Hours)
        .min_points(min_points)
}

fn run(records: &RecordSet, params: &StdbscanParams) -> ClusterModel {
    cluster(records, params, &CancelToken::new()).unwrap().model
}

/// Two tight groups of three, ~500 km apart, all within the same hour
fn two_groups() -> RecordSet {
    vec![
        north_of(0.0, 0.0),
        north_of(0.5, 300.0),
        north_of(1.0, 600.0),
        north_of(500.0, 0.0),
        north_of(500.5, 300.0),
        north_of(501.0, 600.0),
    ]
    .into()
}

/// Deterministic scatter of records over a few hundred km and a few days
fn scatter(n: usize) -> RecordSet {
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    let mut rng = ChaCha8Rng::seed_from_u64(42);

    (0..n)
        .map(|i| {
            let cell = (i % 4) as f64;
            Record::new(
                10.0 + cell * 0.5 + rng.gen_range(0.0..0.1),
                50.0 + rng.gen_range(0.0..0.1),
                cell * 86_400.0 + rng.gen_range(0.0..4.0 * HOUR),
            )
        })
        .collect()
}

/// Records sharing a cluster at `small` also share one at `large`, and
/// nothing clustered at `small` is noise at `large`
fn assert_clusters_grow(small: &ClusterModel, large: &ClusterModel) {
    let (a, b) = (small.assignments(), large.assignments());
    for i in 0..a.len() {
        if a[i] == NOISE {
            continue;
        }
        assert_ne!(b[i], NOISE, "record {} lost its cluster", i);
        for j in 0..a.len() {
            if a[j] == a[i] {
                assert_eq!(b[j], b[i], "records {} and {} were split", i, j);
            }
        }
    }
}

// ========================================================================
// Neighborhood Query
// ========================================================================

#[test]
fn test_neighborhood_includes_center_in_input_order() {
    let records = two_groups();
    let thresholds = Thresholds::new(10.0, 1.0 / 24.0, 1);

    let hood = neighborhood(&records.as_slice()[1], records.as_slice(), &thresholds);
    assert_eq!(hood, vec![0, 1, 2]);
}

#[test]
fn test_neighborhood_requires_both_tests() {
    let records: RecordSet = vec![
        north_of(0.0, 0.0),
        north_of(0.1, 10.0 * HOUR), // close in space, far in time
        north_of(50.0, 0.0),        // close in time, far in space
        north_of(0.2, 0.5 * HOUR),  // close in both
    ]
    .into();
    let thresholds = Thresholds::new(1.0, 1.0 / 24.0, 1);

    let hood = neighborhood(&records.as_slice()[0], records.as_slice(), &thresholds);
    assert_eq!(hood, vec![0, 3]);
}

#[test]
fn test_neighborhood_boundary_is_excluded() {
    let records: RecordSet = vec![
        Record::new(0.0, 0.0, 0.0),
        Record::new(0.0, 0.0, 86_400.0), // exactly one "day" away
    ]
    .into();
    let thresholds = Thresholds::new(1.0, 1.0, 1);

    let hood = neighborhood(&records.as_slice()[0], records.as_slice(), &thresholds);
    assert_eq!(hood, vec![0]);
}

#[test]
fn test_zero_thresholds_exclude_even_the_center() {
    let records: RecordSet = vec![Record::new(0.0, 0.0, 0.0)].into();
    let thresholds = Thresholds::new(0.0, 0.0, 1);

    let hood = neighborhood(&records.as_slice()[0], records.as_slice(), &thresholds);
    assert!(hood.is_empty());
}

#[test]
fn test_precomputed_matches_brute_force() {
    let records = scatter(60);
    let thresholds = Thresholds::new(5.0, 0.1, 3);

    let scan = BruteForceScan::new(records.as_slice(), thresholds);
    let index = PrecomputedNeighborhoods::build(records.as_slice(), &thresholds);

    assert_eq!(scan.len(), index.len());
    for i in 0..records.len() {
        assert_eq!(scan.neighbors(i), index.neighbors(i), "record {}", i);
    }
    assert!(index.total_pairs() >= records.len());
}

// ========================================================================
// Cluster Expansion Engine
// ========================================================================

#[test]
fn test_scenario_three_close_records_share_a_cluster() {
    let records: RecordSet = vec![
        Record::new(10.0, 50.0, 0.0),
        Record::new(10.001, 50.0, 600.0),
        Record::new(10.0, 50.001, 1200.0),
    ]
    .into();

    let model = run(&records, &params(1.0, 1.0, 2));
    assert_eq!(model.assignments(), &[1, 1, 1]);
    assert_eq!(model.discovered_clusters(), 1);
    assert_eq!(model.num_clusters(), 1);
}

#[test]
fn test_scenario_isolated_record_is_noise() {
    let records: RecordSet = vec![Record::new(10.0, 50.0, 0.0)].into();
    let p = StdbscanParams::new()
        .epsilon_space(0.1, SpatialUnit::Kilometers)
        .epsilon_time(0.01, TemporalUnit::Days)
        .min_points(3);

    let model = run(&records, &p);
    assert_eq!(model.assignments(), &[NOISE]);
    assert_eq!(model.discovered_clusters(), 0);
    assert_eq!(model.num_clusters(), 1);
    assert!(model.is_noise(0));
}

#[test]
fn test_scenario_two_distant_groups() {
    let records = two_groups();
    let model = run(&records, &params(10.0, 1.0, 3));

    assert_eq!(model.assignments(), &[1, 1, 1, 2, 2, 2]);
    assert_eq!(model.discovered_clusters(), 2);
    assert!(model.noise().is_empty());

    let clusters = model.clusters();
    assert_eq!(clusters.len(), 2);
    assert_eq!(clusters[0].members, vec![0, 1, 2]);
    assert_eq!(clusters[1].members, vec![3, 4, 5]);
}

#[test]
fn test_scenario_noised_record_is_absorbed_later() {
    // Positions along a meridian in km: the first record is too sparse on
    // its own and is only reachable from P1, which is not the seed.
    let records: RecordSet = vec![
        north_of(0.0, 0.0), // B
        north_of(2.0, 0.0), // P3, seed
        north_of(1.5, 0.0), // P2
        north_of(0.9, 0.0), // P1
        north_of(2.4, 0.0), // P4
    ]
    .into();
    let thresholds = Thresholds::new(1.0, 1.0, 3);
    let scan = BruteForceScan::new(records.as_slice(), thresholds);
    let mut state = VisitState::new(records.len());

    let discovered = expand_clusters(&scan, &mut state, &CancelToken::new()).unwrap();

    assert_eq!(discovered, 1);
    assert_eq!(state.assignments, vec![1, 1, 1, 1, 1]);
    assert!(state.is_noised(0));
    assert!(state.is_visited(0));
    assert!(!state.is_noised(1));
}

#[test]
fn test_border_record_is_relabeled_by_later_seed() {
    // b sits between two dense groups and is a neighbor of both seeds
    let records: RecordSet = vec![
        north_of(0.0, 0.0),
        north_of(-0.3, 0.0),
        north_of(-0.6, 0.0),
        north_of(0.9, 0.0), // b
        north_of(1.8, 0.0),
        north_of(2.1, 0.0),
        north_of(2.4, 0.0),
    ]
    .into();
    let p = params(1.0, 1.0, 4);

    let sequential = run(&records, &p);
    assert_eq!(sequential.assignments(), &[1, 1, 1, 2, 2, 2, 2]);
    assert_eq!(run(&records, &p.clone().parallel(true)), sequential);
}

#[test]
fn test_all_unreachable_records_stay_noise() {
    let records: RecordSet = vec![north_of(0.0, 0.0), north_of(50.0, 0.0), north_of(100.0, 0.0)]
        .into();
    let thresholds = Thresholds::new(1.0, 1.0, 2);
    let scan = BruteForceScan::new(records.as_slice(), thresholds);
    let mut state = VisitState::new(records.len());

    let discovered = expand_clusters(&scan, &mut state, &CancelToken::new()).unwrap();

    assert_eq!(discovered, 0);
    assert_eq!(state.assignments, vec![NOISE; 3]);
    assert_eq!(state.noised, vec![true; 3]);
    assert_eq!(state.visited, vec![false; 3]);
}

#[test]
fn test_empty_input() {
    let model = run(&RecordSet::default(), &params(1.0, 1.0, 2));
    assert!(model.is_empty());
    assert_eq!(model.discovered_clusters(), 0);
    assert_eq!(model.num_clusters(), 1);
    assert!(model.clusters().is_empty());
}

#[test]
fn test_zero_min_points_terminates_with_one_cluster() {
    let records = scatter(40);
    let thresholds = Thresholds::new(1_000.0, 10.0, 0);
    let scan = BruteForceScan::new(records.as_slice(), thresholds);

    let model = run_with_query(&scan, &CancelToken::new()).unwrap();
    assert_eq!(model.discovered_clusters(), 1);
    assert!(model.assignments().iter().all(|&c| c == 1));
}

#[test]
fn test_zero_min_points_with_empty_neighborhoods() {
    let records = two_groups();
    let thresholds = Thresholds::new(0.0, 0.0, 0);
    let scan = BruteForceScan::new(records.as_slice(), thresholds);

    // every seed is labeled but never visited, so each record is its own cluster
    let model = run_with_query(&scan, &CancelToken::new()).unwrap();
    assert_eq!(model.assignments(), &[1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_missing_fields_merge_records() {
    let records: RecordSet = vec![
        north_of(0.0, 0.0),
        north_of(0.5, 0.0),
        Record {
            latitude: None,
            longitude: None,
            ..north_of(900.0, 60.0)
        },
        Record {
            timestamp: None,
            ..north_of(0.3, 0.0)
        },
    ]
    .into();

    let model = run(&records, &params(1.0, 1.0, 4));
    assert_eq!(model.assignments(), &[1, 1, 1, 1]);
}

#[test]
fn test_idempotent_runs() {
    let records = scatter(80);
    let p = params(3.0, 2.0, 4);

    let first = run(&records, &p);
    let second = run(&records, &p);
    assert_eq!(first, second);
}

#[test]
fn test_parallel_matches_sequential() {
    let records = scatter(120);
    let p = params(4.0, 3.0, 4);

    let sequential = run(&records, &p);
    let parallel = run(&records, &p.clone().parallel(true));
    assert_eq!(sequential, parallel);
    assert!(sequential.discovered_clusters() > 0);
}

#[test]
fn test_every_record_has_one_valid_assignment() {
    let records = scatter(100);
    let model = run(&records, &params(2.0, 1.0, 3));

    assert_eq!(model.len(), records.len());
    assert!(model
        .assignments()
        .iter()
        .all(|&c| c <= model.discovered_clusters()));

    let clustered: usize = model.clusters().iter().map(Cluster::len).sum();
    assert_eq!(clustered + model.noise().len(), records.len());
}

#[test]
fn test_growing_threshold_merges_groups() {
    let records = two_groups();
    let models: Vec<ClusterModel> = [10.0, 100.0, 600.0]
        .iter()
        .map(|&eps| run(&records, &params(eps, 1.0, 3)))
        .collect();

    let counts: Vec<usize> = models.iter().map(ClusterModel::discovered_clusters).collect();
    assert_eq!(counts, vec![2, 2, 1]);
    for pair in models.windows(2) {
        assert_clusters_grow(&pair[0], &pair[1]);
    }
}

#[test]
fn test_growing_temporal_threshold_merges_groups() {
    // Same places, two days apart
    let records: RecordSet = vec![
        north_of(0.0, 0.0),
        north_of(0.5, 300.0),
        north_of(1.0, 600.0),
        north_of(0.0, 48.0 * HOUR),
        north_of(0.5, 48.0 * HOUR + 300.0),
        north_of(1.0, 48.0 * HOUR + 600.0),
    ]
    .into();

    let models: Vec<ClusterModel> = [1.0, 10.0, 100.0]
        .iter()
        .map(|&eps_hours| run(&records, &params(10.0, eps_hours, 3)))
        .collect();

    let counts: Vec<usize> = models.iter().map(ClusterModel::discovered_clusters).collect();
    assert_eq!(counts, vec![2, 2, 1]);
    assert_eq!(models[0].assignments(), &[1, 1, 1, 2, 2, 2]);
    assert_eq!(models[2].assignments(), &[1; 6]);
    for pair in models.windows(2) {
        assert_clusters_grow(&pair[0], &pair[1]);
    }
}

#[test]
fn test_meters_equal_kilometers() {
    let records = scatter(60);
    let in_km = params(1.0, 2.0, 3);
    let in_m = in_km.clone().epsilon_space(1000.0, SpatialUnit::Meters);

    assert_eq!(run(&records, &in_km), run(&records, &in_m));
}

#[test]
fn test_cancelled_run_returns_error() {
    let records = two_groups();
    let token = CancelToken::new();
    token.cancel();

    let err = cluster(&records, &params(10.0, 1.0, 3), &token).unwrap_err();
    assert!(matches!(
        err,
        ClusterError::Cancelled {
            processed: 0,
            total: 6
        }
    ));

    let err = cluster(&records, &params(10.0, 1.0, 3).parallel(true), &token).unwrap_err();
    assert!(matches!(err, ClusterError::Cancelled { .. }));
}

// ========================================================================
// Parameters
// ========================================================================

#[test]
fn test_default_params() {
    let p = StdbscanParams::default();
    assert_eq!(p.epsilon_space, 10.0);
    assert_eq!(p.space_unit, SpatialUnit::Kilometers);
    assert_eq!(p.epsilon_time, 10.0);
    assert_eq!(p.time_unit, TemporalUnit::Hours);
    assert_eq!(p.min_points, 5);
    assert!(p.add_cluster_label);
    assert!(!p.remove_unlabeled);
    assert!(!p.parallel);
}

#[test]
fn test_validate_converts_units() {
    let t = StdbscanParams::new()
        .epsilon_space(250.0, SpatialUnit::Meters)
        .epsilon_time(2.0, TemporalUnit::Weeks)
        .min_points(2)
        .validate()
        .unwrap();

    assert!((t.epsilon_space_km - 0.25).abs() < 1e-12);
    assert_eq!(t.epsilon_time_days, 14.0);
    assert_eq!(t.min_points, 2);
}

#[test]
fn test_validate_rejects_bad_input() {
    let negative = params(-1.0, 1.0, 2).validate().unwrap_err();
    assert!(matches!(
        negative,
        ParamError::NegativeThreshold {
            name: "epsilon_space",
            ..
        }
    ));

    let nan = params(1.0, f64::NAN, 2).validate().unwrap_err();
    assert!(matches!(
        nan,
        ParamError::NonFiniteThreshold {
            name: "epsilon_time",
            ..
        }
    ));

    assert_eq!(
        params(1.0, 1.0, 0).validate().unwrap_err(),
        ParamError::MinPointsTooSmall(0)
    );
}

#[test]
fn test_invalid_params_fail_before_run() {
    let err = cluster(&two_groups(), &params(1.0, 1.0, 0), &CancelToken::new()).unwrap_err();
    assert!(matches!(err, ClusterError::InvalidParams(_)));
}

#[test]
fn test_params_deserialize_with_defaults() {
    let p: StdbscanParams =
        serde_json::from_str(r#"{"epsilon_space": 500, "space_unit": "meters"}"#).unwrap();
    assert_eq!(p.epsilon_space, 500.0);
    assert_eq!(p.space_unit, SpatialUnit::Meters);
    assert_eq!(p.min_points, 5);
}

// ========================================================================
// Model output
// ========================================================================

#[test]
fn test_cluster_labels_follow_flag() {
    let records: RecordSet = vec![
        north_of(0.0, 0.0),
        north_of(0.2, 0.0),
        north_of(0.4, 0.0),
        north_of(80.0, 0.0),
    ]
    .into();

    let with_labels = cluster(&records, &params(1.0, 1.0, 3), &CancelToken::new()).unwrap();
    assert_eq!(
        with_labels.labels.unwrap(),
        vec!["cluster_1", "cluster_1", "cluster_1", "cluster_0"]
    );

    let without = cluster(
        &records,
        &params(1.0, 1.0, 3).add_cluster_label(false),
        &CancelToken::new(),
    )
    .unwrap();
    assert!(without.labels.is_none());
}

#[test]
fn test_labeled_records_can_drop_noise() {
    let model = ClusterModel::new(2, vec![1, 0, 2, 0, 1]);

    assert_eq!(model.labeled_records(false).len(), 5);
    assert_eq!(model.labeled_records(true), vec![(0, 1), (2, 2), (4, 1)]);
    assert_eq!(model.noise(), vec![1, 3]);
    assert_eq!(model.cluster_of(2), Some(2));
    assert_eq!(model.cluster_of(1), None);
    assert_eq!(model.cluster_of(99), None);
    assert!(!model.is_noise(99));
}
