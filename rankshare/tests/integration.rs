//! Integration tests for RankShare
//!
//! These tests drive full share-accumulate-finish rounds through the public
//! facade, covering the end-to-end behavior of shared percentile columns.

use rankshare::{
    Collector, Fraction, Mapper, Policy, PostOp, ShareError, ShareMap, SharedCollector, SortSpec,
    SorterCache, VecCollector, percentile, percentile_of_sorted, reduce, reduce_par,
};

fn fraction(p: f64) -> Fraction {
    Fraction::new(p).unwrap()
}

fn tens() -> Vec<f64> {
    (0..10).map(|i| (i * 10) as f64).collect()
}

fn float_sort() -> PostOp<Vec<f64>> {
    SorterCache::new().sorter(&SortSpec::by(f64::total_cmp))
}

/// Four policies over one accumulation: the canonical shared-column round.
#[test]
fn test_four_policy_columns_share_one_pass() {
    let median = fraction(0.5);
    let sort = float_sort();

    let floor = SharedCollector::of(
        VecCollector::new(),
        sort.clone(),
        percentile(median, Policy::floor()),
    );
    let half_up = floor.share(sort.clone(), percentile(median, Policy::half_up()));
    let linear = floor.share(sort.clone(), percentile(median, Policy::linear()));
    let ceiling = floor.share(sort, percentile(median, Policy::ceiling()));

    assert_eq!(floor.view_count(), 4);
    assert!(floor.is_uniform());

    let (lo, mid, lerp, hi) = reduce(tens(), &(floor, half_up, linear, ceiling));
    assert_eq!(lo, Some(40.0));
    assert_eq!(mid, Some(50.0));
    assert_eq!(lerp, Some(45.0));
    assert_eq!(hi, Some(50.0));
}

/// Fractions 0 and 1 pick the first and last element of the sorted data.
#[test]
fn test_extreme_fractions() {
    let sort = float_sort();
    let first = SharedCollector::of(
        VecCollector::new(),
        sort.clone(),
        percentile(Fraction::MIN, Policy::floor()),
    );
    let last = first.share(sort, percentile(Fraction::MAX, Policy::floor()));

    let (lo, hi) = reduce(vec![20.0, 0.0, 90.0, 10.0], &(first, last));
    assert_eq!(lo, Some(0.0));
    assert_eq!(hi, Some(90.0));
}

/// A one-element sequence resolves to that element for every fraction.
#[test]
fn test_singleton_sequence() {
    for step in 0..=10 {
        let p = fraction(step as f64 / 10.0);
        let column = SharedCollector::of(
            VecCollector::new(),
            float_sort(),
            percentile(p, Policy::linear()),
        );
        assert_eq!(reduce(vec![42.0], &column), Some(42.0));
    }
}

/// An empty sequence yields absent results, not errors.
#[test]
fn test_empty_sequence_is_absent() {
    let sort = float_sort();
    let floor = SharedCollector::of(
        VecCollector::new(),
        sort.clone(),
        percentile(fraction(0.5), Policy::floor()),
    );
    let linear = floor.share(sort, percentile(fraction(0.5), Policy::linear()));

    let (lo, lerp) = reduce(Vec::<f64>::new(), &(floor, linear));
    assert_eq!(lo, None);
    assert_eq!(lerp, None);
}

/// Floor-policy results never decrease as the fraction grows.
#[test]
fn test_results_monotone_in_fraction() {
    let values = tens();
    let mut sorted = values.clone();
    sorted.sort_by(f64::total_cmp);

    let mut last = f64::NEG_INFINITY;
    for step in 0..=100 {
        let p = fraction(step as f64 / 100.0);
        let result = percentile_of_sorted(&sorted, p, &Policy::floor()).unwrap();
        assert!(result >= last, "result went backwards at step {step}");
        last = result;
    }
}

/// Sorting already-sorted data changes nothing.
#[test]
fn test_sort_idempotence() {
    let mut cache = SorterCache::new();
    let sorter = cache.sorter(&SortSpec::by(f64::total_cmp));
    let mut values = tens();
    sorter.apply(&mut values);
    let once = values.clone();
    sorter.apply(&mut values);
    assert_eq!(values, once);
}

/// Columns with different post-processing never observe each other's value.
#[test]
fn test_disagreeing_sorts_stay_independent() {
    let ascending = PostOp::new(|v: &mut Vec<f64>| v.sort_by(f64::total_cmp));
    let descending = PostOp::new(|v: &mut Vec<f64>| v.sort_by(|a, b| f64::total_cmp(b, a)));

    let p = fraction(0.25);
    let asc_col = SharedCollector::of(
        VecCollector::new(),
        ascending,
        percentile(p, Policy::floor()),
    );
    let desc_col = asc_col.share(descending, percentile(p, Policy::floor()));
    assert!(!asc_col.is_uniform());

    let (asc, desc) = reduce(tens(), &(asc_col, desc_col));
    // Same fraction, opposite orders: the columns bracket opposite ends.
    assert_eq!(asc, Some(20.0));
    assert_eq!(desc, Some(70.0));
}

/// A second registration under an id with a different mapper is rejected
/// and leaves no trace on the owner.
#[test]
fn test_mismatched_mapper_rejected() {
    let mut shares = ShareMap::new();
    let sort = float_sort();
    let owner = shares
        .share(
            "values",
            Mapper::new(|x: f64| x),
            VecCollector::new(),
            sort.clone(),
            percentile(fraction(0.5), Policy::floor()),
        )
        .unwrap();

    let rejected = shares.share(
        "values",
        Mapper::new(|x: f64| x),
        VecCollector::new(),
        sort,
        percentile(fraction(0.5), Policy::ceiling()),
    );
    assert!(matches!(
        rejected.unwrap_err(),
        ShareError::MapperMismatch { .. }
    ));
    assert_eq!(owner.view_count(), 1);
    assert!(owner.is_uniform());
}

/// The id-map round from the original demo: four policies under one id.
#[test]
fn test_share_map_four_columns() {
    let median = fraction(0.5);
    let sort = float_sort();
    let mut shares = ShareMap::new();

    let floor = shares
        .share(
            "A",
            Mapper::identity(),
            VecCollector::new(),
            sort.clone(),
            percentile(median, Policy::floor()),
        )
        .unwrap();
    let half_up = shares
        .share(
            "A",
            Mapper::identity(),
            VecCollector::new(),
            sort.clone(),
            percentile(median, Policy::half_up()),
        )
        .unwrap();
    let linear = shares
        .share(
            "A",
            Mapper::identity(),
            VecCollector::new(),
            sort.clone(),
            percentile(median, Policy::linear()),
        )
        .unwrap();
    let ceiling = shares
        .share(
            "A",
            Mapper::identity(),
            VecCollector::new(),
            sort,
            percentile(median, Policy::ceiling()),
        )
        .unwrap();

    let (lo, mid, lerp, hi) = reduce(tens(), &(floor, half_up, linear, ceiling));
    assert_eq!((lo, mid, lerp, hi), (Some(40.0), Some(50.0), Some(45.0), Some(50.0)));
}

/// The keyed flow: tuples collected whole, ranked by an extracted key.
#[test]
fn test_keyed_tuples_rank_by_value() {
    let named: Vec<(&str, f64)> = vec![
        ("ninety", 90.0),
        ("zero", 0.0),
        ("fifty", 50.0),
        ("forty", 40.0),
        ("ten", 10.0),
    ];

    let by_value = SorterCache::new().sorter(&SortSpec::by_key(|t: &(&str, f64)| t.1, f64::total_cmp));
    // Rank 2.5 of five elements brackets the 40 and 50 entries.
    let p = fraction(0.6);

    let floor = SharedCollector::of(
        VecCollector::new(),
        by_value.clone(),
        percentile(p, Policy::floor()),
    );
    let ceiling = floor.share(by_value, percentile(p, Policy::ceiling()));

    let (lo, hi) = reduce(named, &(floor, ceiling));
    assert_eq!(lo, Some(("forty", 40.0)));
    assert_eq!(hi, Some(("fifty", 50.0)));
}

/// A mapper extracts the ranked value before accumulation.
#[test]
fn test_mapped_accumulation() {
    let rows: Vec<(&str, f64)> = vec![("a", 30.0), ("b", 10.0), ("c", 20.0)];
    let column: SharedCollector<(&str, f64), f64, VecCollector<f64>, Option<f64>> =
        SharedCollector::owner(
            Mapper::new(|row: (&str, f64)| row.1),
            VecCollector::new(),
            float_sort(),
            percentile(fraction(1.0), Policy::floor()),
        );
    assert_eq!(reduce(rows, &column), Some(30.0));
}

/// Parallel partial accumulation produces the same columns as one thread.
#[test]
fn test_parallel_drive_matches_sequential() {
    let values: Vec<f64> = (0..5_000).map(|i| (i % 997) as f64).collect();
    let p = fraction(0.95);

    let build = || {
        let sort = float_sort();
        let floor = SharedCollector::of(
            VecCollector::new(),
            sort.clone(),
            percentile(p, Policy::floor()),
        );
        let linear = floor.share(sort, percentile(p, Policy::linear()));
        (floor, linear)
    };

    let sequential = reduce(values.clone(), &build());
    let parallel = reduce_par(values, &build());
    assert_eq!(sequential, parallel);
}

/// Characteristics come from the wrapped base collector.
#[test]
fn test_characteristics_flow_through() {
    let column = SharedCollector::of(
        VecCollector::<f64>::new(),
        float_sort(),
        percentile(fraction(0.5), Policy::floor()),
    );
    assert!(!column.characteristics().unordered);
}
