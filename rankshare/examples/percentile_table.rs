//! Shared Percentile Columns Demo
//!
//! Sweeps the percentile fraction from 0 to 1 and prints one table row per
//! fraction with four policy columns (floor, half-up, linear, ceiling), all
//! derived from a single accumulation and a single sort:
//! - Direct sharing via `SharedCollector::share`
//! - Id-keyed sharing via `ShareMap`
//! - Both again over keyed `(name, value)` rows ranked by the value
//!
//! Run with: cargo run --example percentile_table -p rankshare

use rankshare::prelude::*;

const VALUES: [f64; 10] = [0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0];

fn named_values() -> Vec<(&'static str, f64)> {
    vec![
        ("zero", 0.0),
        ("ten", 10.0),
        ("twenty", 20.0),
        ("thirty", 30.0),
        ("forty", 40.0),
        ("fifty", 50.0),
        ("sixty", 60.0),
        ("seventy", 70.0),
        ("eighty", 80.0),
        ("ninety", 90.0),
    ]
}

fn main() {
    shared_columns();
    shared_columns_by_id();
    keyed_columns();
    keyed_columns_by_id();
}

fn sweep() -> impl Iterator<Item = Fraction> {
    (0..=20).map(|step| Fraction::new(step as f64 / 20.0).expect("fraction in range"))
}

fn fmt(value: Option<f64>) -> String {
    value.map_or_else(|| "   -".to_owned(), |v| format!("{v:4.1}"))
}

fn fmt_named(value: Option<(&str, f64)>) -> String {
    value.map_or_else(
        || "-".to_owned(),
        |(name, v)| format!("({name:7} {v:4.1})"),
    )
}

// ============================================================================
// Plain values
// ============================================================================

fn shared_columns() {
    println!();
    println!("shared columns");
    let header = "percentile -> | floor | halfUp | interpolate | ceil";
    println!("{header}");

    // One sorter handle for every column, so each row sorts exactly once.
    let mut sorts = SorterCache::new();
    let sort = sorts.sorter(&SortSpec::by(f64::total_cmp));

    for p in sweep() {
        let floor = SharedCollector::of(
            VecCollector::new(),
            sort.clone(),
            percentile(p, Policy::floor()),
        );
        let half_up = floor.share(sort.clone(), percentile(p, Policy::half_up()));
        let linear = floor.share(sort.clone(), percentile(p, Policy::linear()));
        let ceiling = floor.share(sort.clone(), percentile(p, Policy::ceiling()));

        let (v1, v2, v3, v4) = reduce(VALUES, &(floor, half_up, linear, ceiling));
        println!(
            "   {:5.3}   -> | {} |  {}  |    {}     | {}",
            p.get(),
            fmt(v1),
            fmt(v2),
            fmt(v3),
            fmt(v4),
        );
    }
    println!("{header}");
}

fn shared_columns_by_id() {
    println!();
    println!("shared columns by id");
    let header = "percentile -> | floor | halfUp | interpolate | ceil";
    println!("{header}");

    let mut sorts = SorterCache::new();
    let sort = sorts.sorter(&SortSpec::by(f64::total_cmp));

    for p in sweep() {
        // One registry per aggregation run.
        let mut shares = ShareMap::new();
        let mut column = |policy: Policy<f64>| {
            shares
                .share(
                    "A",
                    Mapper::identity(),
                    VecCollector::new(),
                    sort.clone(),
                    percentile(p, policy),
                )
                .expect("compatible registration")
        };
        let columns = (
            column(Policy::floor()),
            column(Policy::half_up()),
            column(Policy::linear()),
            column(Policy::ceiling()),
        );

        let (v1, v2, v3, v4) = reduce(VALUES, &columns);
        println!(
            "   {:5.3}   -> | {} |  {}  |    {}     | {}",
            p.get(),
            fmt(v1),
            fmt(v2),
            fmt(v3),
            fmt(v4),
        );
    }
    println!("{header}");
}

// ============================================================================
// Keyed rows: rank the whole row by its value column
// ============================================================================

fn keyed_columns() {
    println!();
    println!("keyed columns");
    let header = "percentile -> | floor | halfUp | ceil";
    println!("{header}");

    let mut sorts = SorterCache::new();
    let by_value = sorts.sorter(&SortSpec::by_key(|row: &(&str, f64)| row.1, f64::total_cmp));

    for p in sweep() {
        let floor = SharedCollector::of(
            VecCollector::new(),
            by_value.clone(),
            percentile(p, Policy::floor()),
        );
        let half_up = floor.share(by_value.clone(), percentile(p, Policy::half_up()));
        let ceiling = floor.share(by_value.clone(), percentile(p, Policy::ceiling()));

        let (v1, v2, v3) = reduce(named_values(), &(floor, half_up, ceiling));
        println!(
            "   {:5.3}   -> | {} | {} | {}",
            p.get(),
            fmt_named(v1),
            fmt_named(v2),
            fmt_named(v3),
        );
    }
    println!("{header}");
}

fn keyed_columns_by_id() {
    println!();
    println!("keyed columns by id");
    let header = "percentile -> | floor | halfUp | ceil";
    println!("{header}");

    let mut sorts = SorterCache::new();
    let by_value = sorts.sorter(&SortSpec::by_key(|row: &(&str, f64)| row.1, f64::total_cmp));

    for p in sweep() {
        let mut shares = ShareMap::new();
        let mut column = |policy: Policy<(&'static str, f64)>| {
            shares
                .share(
                    "A",
                    Mapper::identity(),
                    VecCollector::new(),
                    by_value.clone(),
                    percentile(p, policy),
                )
                .expect("compatible registration")
        };
        let columns = (
            column(Policy::floor()),
            column(Policy::half_up()),
            column(Policy::ceiling()),
        );

        let (v1, v2, v3) = reduce(named_values(), &columns);
        println!(
            "   {:5.3}   -> | {} | {} | {}",
            p.get(),
            fmt_named(v1),
            fmt_named(v2),
            fmt_named(v3),
        );
    }
    println!("{header}");
}
